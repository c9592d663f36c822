use super::order::{Order, OrderPatch, RawOrder};
use super::user::{RawUser, User};
use crate::types::AdaloContext;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    UnexpectedError,
}

/// Boundary to the external record store. The sweep is written against this
/// trait so tests can run it against an in-memory store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, Error>;
    async fn list_users(&self) -> Result<Vec<User>, Error>;
    async fn patch_order(&self, id: &str, patch: OrderPatch) -> Result<(), Error>;
}

/// The collections endpoint sometimes returns `{ "records": [...] }` and
/// sometimes a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Wrapped { records: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Self::Wrapped { records } => records,
            Self::Bare(records) => records,
        }
    }
}

pub struct AdaloStore {
    ctx: AdaloContext,
    http: reqwest::Client,
}

impl AdaloStore {
    pub fn new(ctx: AdaloContext) -> Self {
        Self {
            ctx,
            http: reqwest::Client::new(),
        }
    }

    async fn list_records<T: DeserializeOwned>(
        &self,
        collection_id: &str,
    ) -> Result<Vec<T>, Error> {
        let url = self.ctx.collection_url(collection_id);

        let res = self
            .http
            .get(&url)
            .bearer_auth(&self.ctx.api_key)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to fetch collection {}: {}", collection_id, err);
                Error::UnexpectedError
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::error!(
                "Collection {} fetch failed: {} - {}",
                collection_id,
                status,
                text
            );
            return Err(Error::UnexpectedError);
        }

        res.json::<Listing<T>>()
            .await
            .map(Listing::into_records)
            .map_err(|err| {
                tracing::error!(
                    "Failed to deserialize collection {}: {}",
                    collection_id,
                    err
                );
                Error::UnexpectedError
            })
    }
}

#[async_trait]
impl RecordStore for AdaloStore {
    async fn list_orders(&self) -> Result<Vec<Order>, Error> {
        let raw = self
            .list_records::<RawOrder>(&self.ctx.orders_collection_id)
            .await?;
        Ok(raw.into_iter().filter_map(RawOrder::into_order).collect())
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let raw = self
            .list_records::<RawUser>(&self.ctx.users_collection_id)
            .await?;
        Ok(raw.into_iter().filter_map(RawUser::into_user).collect())
    }

    async fn patch_order(&self, id: &str, patch: OrderPatch) -> Result<(), Error> {
        let url = format!(
            "{}/{}",
            self.ctx.collection_url(&self.ctx.orders_collection_id),
            urlencoding::encode(id)
        );

        let res = self
            .http
            .patch(&url)
            .bearer_auth(&self.ctx.api_key)
            .json(&patch)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to update order {}: {}", id, err);
                Error::UnexpectedError
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::error!("Failed to update order {}: {} - {}", id, status, text);
            return Err(Error::UnexpectedError);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_tolerates_both_response_shapes() {
        let wrapped: Listing<RawUser> =
            serde_json::from_value(json!({ "records": [{ "id": 1 }] })).unwrap();
        assert_eq!(wrapped.into_records().len(), 1);

        let bare: Listing<RawUser> = serde_json::from_value(json!([{ "id": 1 }, { "id": 2 }]))
            .unwrap();
        assert_eq!(bare.into_records().len(), 2);
    }
}
