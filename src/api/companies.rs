//! Companies and moderators

use super::client::{ApiClient, Navigator, Transport};
use crate::error::ApiResult;
use crate::models::{Company, Moderator, Paginated};
use crate::storage::KeyValueStore;

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    /// GET /api/v1/companies/list, optionally narrowed to one moderator
    pub async fn list_companies(&self, moderator_id: Option<u64>) -> ApiResult<Vec<Company>> {
        let query = moderator_id
            .map(|id| vec![("moderator_id".to_string(), id.to_string())])
            .unwrap_or_default();
        let page: Paginated<Company> = self.get_json("/api/v1/companies/list", query).await?;
        Ok(page.data)
    }

    pub async fn list_moderators(&self) -> ApiResult<Vec<Moderator>> {
        let page: Paginated<Moderator> = self.get_json("/api/v1/moderators/list", Vec::new()).await?;
        Ok(page.data)
    }

    pub async fn moderator_companies(&self, moderator_id: u64) -> ApiResult<Vec<Company>> {
        let path = format!("/api/v1/moderators/{}/companies", moderator_id);
        let page: Paginated<Company> = self.get_json(&path, Vec::new()).await?;
        Ok(page.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_companies_for_moderator() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!({"data": [{"id": 1, "name": "ТОО Чистота", "bin_company": "123456789012"}]}));

        let companies = block_on(client.list_companies(Some(5))).unwrap();

        assert_eq!(companies[0].name, "ТОО Чистота");
        assert_eq!(transport.last_request().query, vec![("moderator_id".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_all_companies_has_no_query() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!([]));

        assert!(block_on(client.list_companies(None)).unwrap().is_empty());
        assert!(transport.last_request().query.is_empty());
    }

    #[test]
    fn test_moderator_companies_path() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!([{"id": 3, "name": "ИП Жанна"}]));

        block_on(client.moderator_companies(8)).unwrap();
        assert_eq!(transport.last_request().url, "http://api.test/api/v1/moderators/8/companies");
    }
}
