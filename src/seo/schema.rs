//! schema.org JSON-LD emitters.

use serde_json::{Value, json};

use crate::config::SiteConfig;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// `Organization` structured data for the marketplace.
#[must_use]
pub fn organization_schema(site: &SiteConfig) -> Value {
    let mut org = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Organization",
        "name": site.site_name,
        "url": site.base_url,
        "logo": site.url("/logo.png"),
    });
    if !site.same_as.is_empty()
        && let Some(map) = org.as_object_mut()
    {
        map.insert("sameAs".to_string(), json!(site.same_as));
    }
    org
}

/// `WebSite` structured data, with the sitelinks search box action.
#[must_use]
pub fn website_schema(site: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": site.site_name,
        "url": site.base_url,
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": site.url("/search?q={search_term_string}"),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// Renders structured data as an embeddable `<script>` element.
///
/// `<` is escaped as `\u003c` so string values cannot close the element.
#[must_use]
pub fn json_ld_script(data: &Value) -> String {
    let payload = data.to_string().replace('<', "\\u003c");
    format!(r#"<script type="application/ld+json">{payload}</script>"#)
}
