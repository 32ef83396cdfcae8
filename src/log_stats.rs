use std::fmt;
use std::io::Write;

use mongodb::bson::doc;

use crate::db_mongo::handle::CollectionHandle;
use crate::db_mongo::models::HttpMethod;
use crate::error::Result;

const STATUS_PATH: &str = "/status";

/// Counts gathered from the nginx log collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStats {
    pub total: u64,
    /// One entry per `HttpMethod::ALL`, in that order
    pub methods: Vec<(HttpMethod, u64)>,
    /// `GET /status` requests
    pub status_checks: u64,
}

impl LogStats {
    pub fn method_count(&self, method: HttpMethod) -> u64 {
        self.methods
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

impl fmt::Display for LogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} logs", self.total)?;
        writeln!(f, "Methods:")?;
        for (method, count) in &self.methods {
            writeln!(f, "\tmethod {}: {}", method, count)?;
        }
        writeln!(f, "{} status check", self.status_checks)
    }
}

/// Run the six count queries in report order
pub async fn collect_log_stats<C: CollectionHandle>(collection: &C) -> Result<LogStats> {
    let total = collection.count_matching(doc! {}).await?;

    let mut methods = Vec::with_capacity(HttpMethod::ALL.len());
    for method in HttpMethod::ALL {
        let count = collection
            .count_matching(doc! { "method": method.as_str() })
            .await?;
        methods.push((method, count));
    }

    let status_checks = collection
        .count_matching(doc! { "method": HttpMethod::Get.as_str(), "path": STATUS_PATH })
        .await?;

    tracing::debug!("Collected stats over {} logs", total);

    Ok(LogStats {
        total,
        methods,
        status_checks,
    })
}

/// Collect the stats and write the report to `out`.
///
/// Nothing is written unless every count succeeded.
pub async fn write_log_stats<C, W>(collection: &C, out: &mut W) -> Result<LogStats>
where
    C: CollectionHandle,
    W: Write,
{
    let stats = collect_log_stats(collection).await?;
    write!(out, "{}", stats)?;
    out.flush()?;
    Ok(stats)
}

pub async fn print_log_stats<C: CollectionHandle>(collection: &C) -> Result<LogStats> {
    let stats = collect_log_stats(collection).await?;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", stats)?;
    stdout.flush()?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db_mongo::memory::MemoryCollection;
    use crate::db_mongo::models::LogEntry;
    use crate::error::Error;

    fn sample_logs() -> MemoryCollection {
        let mut entries = Vec::new();
        entries.push(LogEntry::new(HttpMethod::Get, STATUS_PATH));
        for i in 0..5 {
            entries.push(LogEntry::new(HttpMethod::Get, format!("/page/{}", i)));
        }
        entries.push(LogEntry::new(HttpMethod::Post, "/login"));
        entries.push(LogEntry::new(HttpMethod::Post, STATUS_PATH));
        entries.push(LogEntry::new(HttpMethod::Put, "/profile"));
        entries.push(LogEntry::new(HttpMethod::Delete, "/session"));

        let documents = entries.iter().map(|e| e.to_document().unwrap());
        MemoryCollection::from_documents(documents).unwrap()
    }

    #[tokio::test]
    async fn test_counts_per_method_and_status() {
        let stats = collect_log_stats(&sample_logs()).await.unwrap();

        assert_eq!(stats.total, 10);
        assert_eq!(stats.method_count(HttpMethod::Get), 6);
        assert_eq!(stats.method_count(HttpMethod::Post), 2);
        assert_eq!(stats.method_count(HttpMethod::Put), 1);
        assert_eq!(stats.method_count(HttpMethod::Patch), 0);
        assert_eq!(stats.method_count(HttpMethod::Delete), 1);
        assert_eq!(stats.status_checks, 1);
    }

    #[tokio::test]
    async fn test_report_text() {
        let mut out = Vec::new();
        write_log_stats(&sample_logs(), &mut out).await.unwrap();

        let expected = "10 logs\n\
                        Methods:\n\
                        \tmethod GET: 6\n\
                        \tmethod POST: 2\n\
                        \tmethod PUT: 1\n\
                        \tmethod PATCH: 0\n\
                        \tmethod DELETE: 1\n\
                        1 status check\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_empty_collection_reports_zeroes() {
        let stats = collect_log_stats(&MemoryCollection::new()).await.unwrap();
        let report = stats.to_string();

        assert!(report.starts_with("0 logs\nMethods:\n"));
        assert_eq!(report.matches(": 0\n").count(), 5);
        assert!(report.ends_with("0 status check\n"));
    }

    struct Unreachable;

    impl CollectionHandle for Unreachable {
        async fn insert_document(&self, _: mongodb::bson::Document) -> Result<mongodb::bson::Bson> {
            Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into())
        }

        async fn find_documents(
            &self,
            _: mongodb::bson::Document,
        ) -> Result<Vec<mongodb::bson::Document>> {
            Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into())
        }

        async fn update_documents(
            &self,
            _: mongodb::bson::Document,
            _: mongodb::bson::Document,
        ) -> Result<crate::db_mongo::handle::UpdateSummary> {
            Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into())
        }

        async fn count_matching(&self, _: mongodb::bson::Document) -> Result<u64> {
            Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused).into())
        }
    }

    #[tokio::test]
    async fn test_store_failure_aborts_report() {
        let mut out = Vec::new();
        let err = write_log_stats(&Unreachable, &mut out).await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(out.is_empty());
    }
}
