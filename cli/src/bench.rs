use laureate_index::service::api::LaureateService;
use laureate_index::service::protocol::{
    CategoryYearsRequest, LaureateNameRequest, MotivationKeywordRequest,
};
use std::path::Path;
use std::time::Instant;

pub const CSV_HEADER: &str = "Delay (milliseconds)";

pub const CATEGORY_YEARS_FILE: &str = "category_year_delays.csv";
pub const MOTIVATION_KEYWORD_FILE: &str = "motivation_keyword_delays.csv";
pub const NAME_DETAILS_FILE: &str = "name_details_delays.csv";

/// Per-call latencies for one operation, in milliseconds.
#[derive(Debug, Default)]
pub struct Series {
    pub delays_ms: Vec<f64>,
    pub failures: usize,
}

impl Series {
    fn record(&mut self, started: Instant, ok: bool) {
        self.delays_ms
            .push(started.elapsed().as_secs_f64() * 1_000.0);
        if !ok {
            self.failures += 1;
        }
    }

    pub fn mean_ms(&self) -> f64 {
        if self.delays_ms.is_empty() {
            return 0.0;
        }
        self.delays_ms.iter().sum::<f64>() / self.delays_ms.len() as f64
    }

    fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([CSV_HEADER])?;
        for delay in &self.delays_ms {
            writer.write_record([delay.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct BenchReport {
    pub category_years: Series,
    pub motivation_keyword: Series,
    pub name_details: Series,
}

impl BenchReport {
    pub fn write_csv(&self, dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)?;
        self.category_years.write_csv(&dir.join(CATEGORY_YEARS_FILE))?;
        self.motivation_keyword
            .write_csv(&dir.join(MOTIVATION_KEYWORD_FILE))?;
        self.name_details.write_csv(&dir.join(NAME_DETAILS_FILE))?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        let line = |name: &str, series: &Series| {
            format!(
                "{:<36} {:>5} calls  {:>9.3} ms mean  {} failed",
                name,
                series.delays_ms.len(),
                series.mean_ms(),
                series.failures
            )
        };
        [
            line("CountLaureatesByCategoryAndYears", &self.category_years),
            line("CountLaureatesByMotivationKeyword", &self.motivation_keyword),
            line("GetLaureateDetailsByName", &self.name_details),
        ]
        .join("\n")
    }
}

/// Calls each operation `runs` times with fixed arguments, one after another.
///
/// A failed call still contributes its latency.
pub async fn run(service: &dyn LaureateService, runs: usize) -> BenchReport {
    let mut report = BenchReport::default();

    for _ in 0..runs {
        let started = Instant::now();
        let result = service
            .count_laureates_by_category_and_years(CategoryYearsRequest {
                category: "Physics".to_string(),
                start_year: 2015,
                end_year: 2020,
            })
            .await;
        if let Err(e) = &result {
            tracing::warn!("CountLaureatesByCategoryAndYears failed: {}", e);
        }
        report.category_years.record(started, result.is_ok());
    }

    for _ in 0..runs {
        let started = Instant::now();
        let result = service
            .count_laureates_by_motivation_keyword(MotivationKeywordRequest {
                keyword: "Peace".to_string(),
            })
            .await;
        if let Err(e) = &result {
            tracing::warn!("CountLaureatesByMotivationKeyword failed: {}", e);
        }
        report.motivation_keyword.record(started, result.is_ok());
    }

    for _ in 0..runs {
        let started = Instant::now();
        let result = service
            .get_laureate_details_by_name(LaureateNameRequest {
                firstname: "Alain".to_string(),
                surname: "Aspect".to_string(),
            })
            .await;
        if let Err(e) = &result {
            tracing::warn!("GetLaureateDetailsByName failed: {}", e);
        }
        report.name_details.record(started, result.is_ok());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use laureate_index::config::{ClientConfig, YearBounds};
    use laureate_index::service::local::LocalService;
    use laureate_index::service::remote::RemoteService;
    use laureate_index::storage::memory::RecordStore;
    use laureate_index::storage::types::{AwardRecord, Recipient};
    use std::time::Duration;

    fn service() -> LocalService {
        let store = RecordStore::from_records(vec![AwardRecord {
            year: 2022,
            category: "physics".to_string(),
            recipients: vec![Recipient::new(
                "Alain",
                "Aspect",
                "for experiments with entangled photons",
            )],
        }]);
        LocalService::from_store(store, YearBounds::default())
    }

    #[tokio::test]
    async fn test_run_records_every_call() {
        let report = run(&service(), 5).await;

        assert_eq!(report.category_years.delays_ms.len(), 5);
        assert_eq!(report.motivation_keyword.delays_ms.len(), 5);
        assert_eq!(report.name_details.delays_ms.len(), 5);
        assert_eq!(report.category_years.failures, 0);
        assert_eq!(report.name_details.failures, 0);
        assert!(report.category_years.delays_ms.iter().all(|d| *d >= 0.0));
    }

    #[tokio::test]
    async fn test_write_csv_one_file_per_operation() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("latency");
        let report = run(&service(), 3).await;
        report.write_csv(&out).unwrap();

        for file in [CATEGORY_YEARS_FILE, MOTIVATION_KEYWORD_FILE, NAME_DETAILS_FILE] {
            let text = std::fs::read_to_string(out.join(file)).unwrap();
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines[0], CSV_HEADER);
            assert_eq!(lines.len(), 4, "{}", file);
            assert!(lines[1..].iter().all(|l| l.parse::<f64>().is_ok()));
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_counts_failures() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let remote = RemoteService::new(
            ClientConfig::new(addr.to_string()).with_timeout(Duration::from_millis(500)),
        );
        let report = run(&remote, 2).await;

        assert_eq!(report.category_years.failures, 2);
        assert_eq!(report.motivation_keyword.failures, 2);
        assert_eq!(report.name_details.failures, 2);
        assert!(report.summary().contains("2 failed"));
    }

    #[test]
    fn test_mean_of_empty_series_is_zero() {
        assert_eq!(Series::default().mean_ms(), 0.0);
    }
}
