//! Catalog construction.
//!
//! The catalog is a pure function of the discovered modules: a list of
//! category buckets in first-encounter order, each holding endpoint
//! summaries in discovery order. Built once at startup, immutable after.

use super::manifest::HandlerModule;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Aggregated endpoint metadata, grouped by category
#[derive(Debug, Clone, serde::Serialize)]
pub struct Catalog {
    pub count: usize,
    pub endpoints: Vec<CategoryBucket>,
}

/// One category and its endpoints
#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoryBucket {
    pub name: String,
    pub items: Vec<EndpointSummary>,
}

/// Per-endpoint catalog record
#[derive(Debug, Clone)]
pub struct EndpointSummary {
    pub name: String,
    pub desc: String,
    pub path: String,
}

// The frontend consumes items keyed by endpoint name:
// {"Hello": {"desc": "...", "path": "/example/hello?name="}}
impl Serialize for EndpointSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Body<'a> {
            desc: &'a str,
            path: &'a str,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.name,
            &Body {
                desc: &self.desc,
                path: &self.path,
            },
        )?;
        map.end()
    }
}

impl Catalog {
    /// Group the discovered modules into category buckets.
    ///
    /// Buckets are created lazily on first encounter of a category name and
    /// matched by exact string equality: no case folding or trimming, so
    /// "anime" and "Anime" form two buckets. Inherited from the source
    /// design; kept verbatim rather than silently fixed.
    pub fn build(modules: &[HandlerModule]) -> Self {
        let mut endpoints: Vec<CategoryBucket> = Vec::new();

        for module in modules {
            let summary = EndpointSummary {
                name: module.meta.name.clone(),
                desc: module.meta.desc.clone(),
                path: display_path(&module.route, &module.meta.params),
            };

            match endpoints
                .iter_mut()
                .find(|bucket| bucket.name == module.meta.category)
            {
                Some(bucket) => bucket.items.push(summary),
                None => endpoints.push(CategoryBucket {
                    name: module.meta.category.clone(),
                    items: vec![summary],
                }),
            }
        }

        Self {
            count: modules.len(),
            endpoints,
        }
    }
}

/// Render the externally callable path, with a ready-made query template
/// (`?artist=&song=`) when the endpoint declared parameters.
pub fn display_path(route: &str, params: &[String]) -> String {
    if params.is_empty() {
        return route.to_string();
    }
    let template = params
        .iter()
        .map(|p| format!("{p}="))
        .collect::<Vec<_>>()
        .join("&");
    format!("{route}?{template}")
}
