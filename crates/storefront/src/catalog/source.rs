//! Remote catalog sources.

use std::sync::Arc;
use std::time::Duration;

use jabuticaba_core::{ImagePath, Price, ProductId};
use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::models::Product;

/// How long fetched catalogs are considered fresh.
const CATALOG_TTL: Duration = Duration::from_secs(60);

/// Failure to obtain the remote catalog.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog response was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Something that can produce the remote product list.
///
/// Implementations may cache; callers treat every fetch failure the same
/// way, by falling back to locally cached state.
pub trait CatalogSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Product>, SourceError>> + Send;
}

// ============================================================================
// Wire format
// ============================================================================

/// A product as the remote endpoints serialize it.
///
/// Ids arrive as either JSON numbers or numeric strings, and prices as
/// either numbers or decimal strings; both are accepted.
#[derive(Debug, Deserialize)]
struct RemoteProduct {
    #[serde(deserialize_with = "lenient_id")]
    id: i64,
    #[serde(default)]
    nome: String,
    #[serde(default)]
    preco: Decimal,
    #[serde(default)]
    img: Option<String>,
}

/// The static database document: a single object wrapping the product list.
#[derive(Debug, Deserialize)]
struct StaticDb {
    #[serde(default)]
    products: Vec<RemoteProduct>,
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(i64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl From<RemoteProduct> for Product {
    fn from(remote: RemoteProduct) -> Self {
        Self {
            id: ProductId::new(remote.id),
            name: remote.nome,
            // Negative remote prices are clamped rather than rejected.
            price: Price::new(remote.preco).unwrap_or(Price::ZERO),
            image: ImagePath::normalize(remote.img.as_deref().unwrap_or_default()),
        }
    }
}

// ============================================================================
// HTTP source
// ============================================================================

/// Fetches the catalog over HTTP with a short-lived in-process cache.
///
/// The primary endpoint returns a bare JSON array of products. When it
/// fails and a static database URL is configured, that document is fetched
/// instead; with no fallback configured the primary error is returned.
pub struct HttpCatalogSource {
    client: reqwest::Client,
    products_url: String,
    static_db_url: Option<String>,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl HttpCatalogSource {
    #[must_use]
    pub fn new(products_url: impl Into<String>, static_db_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            products_url: products_url.into(),
            static_db_url,
            cache: Cache::builder()
                .max_capacity(1)
                .time_to_live(CATALOG_TTL)
                .build(),
        }
    }

    async fn fetch_primary(&self) -> Result<Vec<Product>, SourceError> {
        let body = self
            .client
            .get(&self.products_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let records: Vec<RemoteProduct> = serde_json::from_str(&body)?;
        Ok(records.into_iter().map(Product::from).collect())
    }

    async fn fetch_static_db(&self, url: &str) -> Result<Vec<Product>, SourceError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let db: StaticDb = serde_json::from_str(&body)?;
        Ok(db.products.into_iter().map(Product::from).collect())
    }

    async fn fetch_uncached(&self) -> Result<Vec<Product>, SourceError> {
        match self.fetch_primary().await {
            Ok(products) => Ok(products),
            Err(primary) => match &self.static_db_url {
                Some(url) => {
                    tracing::warn!(%primary, "catalog endpoint failed, trying static database");
                    self.fetch_static_db(url).await
                }
                None => Err(primary),
            },
        }
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, SourceError> {
        if let Some(cached) = self.cache.get("products").await {
            return Ok(cached.as_ref().clone());
        }
        let products = self.fetch_uncached().await?;
        self.cache
            .insert("products", Arc::new(products.clone()))
            .await;
        Ok(products)
    }
}
