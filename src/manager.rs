use crate::config::ReportConfig;
use crate::record::DataSource;
use crate::render;
use crate::report::{self, ReportSummary};
use crate::store::{SAMPLE_ROWS, TABLE_FILE, TableStore};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_FILE: &str = "report.toml";

pub struct Manager {
    report_dir: PathBuf,
    cfg: ReportConfig,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(report_dir: P) -> Result<Self> {
        let report_dir = report_dir.as_ref().to_path_buf();

        let cfg = ReportConfig::load_or_default(report_dir.join(CONFIG_FILE))
            .context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { report_dir, cfg })
    }

    pub fn render_report(&self) -> Result<()> {
        fs::create_dir_all(&self.report_dir)
            .with_context(|| format!("failed to create {:?}", self.report_dir))?;

        // The store is throwaway: recreated from the sample on every render.
        let store = TableStore::new(self.report_dir.join(TABLE_FILE));
        store
            .recreate(&SAMPLE_ROWS)
            .context("failed to recreate sample store")?;
        log::info!("recreated sample store with {} rows", SAMPLE_ROWS.len());

        let summary = self
            .build_summary(&store)
            .context("failed to build report summary")?;
        log::info!(
            "fitted normal density: mean = {:.4}, std_dev = {:.4}",
            summary.parameters.mean,
            summary.parameters.std_dev
        );

        let summary_file = self.report_dir.join(render::SUMMARY_FILE);
        render::write_summary(&summary_file, &summary).context("failed to write summary")?;
        log::info!("wrote {summary_file:?}");

        let page_file = self.report_dir.join(render::PAGE_FILE);
        render::write_page(&page_file, &summary, &self.cfg).context("failed to write page")?;
        log::info!("wrote {page_file:?}");

        Ok(())
    }

    pub fn clean_report(&self) -> Result<()> {
        TableStore::new(self.report_dir.join(TABLE_FILE))
            .delete()
            .context("failed to delete sample store")?;

        for name in [render::SUMMARY_FILE, render::PAGE_FILE] {
            let file = self.report_dir.join(name);
            if file.exists() {
                fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
                log::info!("removed {file:?}");
            }
        }

        Ok(())
    }

    fn build_summary(&self, source: &dyn DataSource) -> Result<ReportSummary> {
        let records = source.fetch_records().context("failed to fetch records")?;
        log::info!("loaded {} records", records.len());

        report::build_report(records, &self.cfg)
    }
}
