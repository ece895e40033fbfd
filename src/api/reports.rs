//! Reports and spreadsheet exports

use super::client::{ApiClient, Navigator, Query, Transport};
use crate::error::ApiResult;
use crate::models::Envelope;
use crate::pivot::{CategoryReport, OperationsReport};
use crate::storage::KeyValueStore;

const MANAGEMENT_REPORTS: &str = "/api/v1/management/reports";
const FINAL_PROCESSING_REPORTS: &str = "/api/v1/management/final-processing-reports";

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    /// Category report for admins and moderators
    pub async fn management_report(&self, query: Query) -> ApiResult<CategoryReport> {
        let body: Envelope<CategoryReport> = self.get_json(MANAGEMENT_REPORTS, query).await?;
        Ok(body.into_inner())
    }

    /// GET /api/reports, the company-scoped category report
    pub async fn role_report(&self, query: Query) -> ApiResult<CategoryReport> {
        let body: Envelope<CategoryReport> = self.get_json("/api/reports", query).await?;
        Ok(body.into_inner())
    }

    pub async fn final_processing_report(&self, query: Query) -> ApiResult<OperationsReport> {
        let body: Envelope<OperationsReport> = self.get_json(FINAL_PROCESSING_REPORTS, query).await?;
        Ok(body.into_inner())
    }

    /// Spreadsheet of the category report
    pub async fn export_report(&self, query: Query) -> ApiResult<Vec<u8>> {
        self.get_binary(&format!("{}/excel", MANAGEMENT_REPORTS), query).await
    }

    pub async fn export_final_processing_report(&self, query: Query) -> ApiResult<Vec<u8>> {
        self.get_binary(&format!("{}/excel", FINAL_PROCESSING_REPORTS), query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResponseKind;
    use crate::filters::{ReportFilters, ReportScope};
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    fn filters() -> ReportFilters {
        ReportFilters {
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
            moderator_id: "5".into(),
            company_ids: vec!["1".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_management_report_decodes_wrapped() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(
            200,
            json!({"data": {"headers": {"p": {"name": "Пластик", "wastes": []}}, "companies": [{"name": "А", "p_total": 1}]}}),
        );

        let report = block_on(client.management_report(filters().to_query(ReportScope::Admin))).unwrap();

        assert_eq!(report.companies.len(), 1);
        let sent = transport.last_request();
        assert_eq!(sent.url, "http://api.test/api/v1/management/reports");
        assert!(sent.query.contains(&("company_ids[]".into(), "1".into())));
    }

    #[test]
    fn test_company_report_endpoint() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!({"headers": {}, "companies": [], "summary": {"current_month": 1, "total": 2}}));

        let query = filters().to_query(ReportScope::Company { company_id: 4 });
        let report = block_on(client.role_report(query)).unwrap();

        assert_eq!(report.summary.map(|s| s.total), Some(2.0));
        assert_eq!(transport.last_request().url, "http://api.test/api/reports");
    }

    #[test]
    fn test_final_processing_requests_operations_view() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!({"operations": [], "wastes": [], "companies": []}));

        let query = filters().to_query(ReportScope::FinalProcessing);
        block_on(client.final_processing_report(query)).unwrap();

        assert!(transport
            .last_request()
            .query
            .contains(&("view_type".into(), "operations".into())));
    }

    #[test]
    fn test_export_is_single_binary_call() {
        let (client, transport, _, _) = test_client();
        transport.reply_bytes(200, b"PK\x03\x04".to_vec());

        let bytes = block_on(client.export_report(filters().to_query(ReportScope::Admin))).unwrap();

        assert_eq!(bytes, b"PK\x03\x04".to_vec());
        assert_eq!(transport.request_count(), 1);
        let sent = transport.last_request();
        assert_eq!(sent.response, ResponseKind::Binary);
        assert_eq!(sent.url, "http://api.test/api/v1/management/reports/excel");
    }

    #[test]
    fn test_final_processing_export_path() {
        let (client, transport, _, _) = test_client();
        transport.reply_bytes(200, vec![1, 2, 3]);

        block_on(client.export_final_processing_report(Vec::new())).unwrap();
        assert_eq!(
            transport.last_request().url,
            "http://api.test/api/v1/management/final-processing-reports/excel"
        );
    }
}
