//! Crawler policy (`robots.txt`).

use std::fmt::Write as _;

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::SiteConfig;

/// Paths kept out of search indexes on the production site.
pub const PRODUCTION_DISALLOW: [&str; 4] =
    ["/api/", "/admin/", "/dashboard/", "/business/dashboard/"];

/// Directives for one user agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RobotsRule {
    /// User agent the rule applies to.
    pub user_agent: String,
    /// Allowed path prefixes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<String>,
    /// Disallowed path prefixes.
    pub disallow: Vec<String>,
}

/// Complete crawler policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RobotsPolicy {
    /// Per-agent rules.
    pub rules: Vec<RobotsRule>,
    /// Absolute sitemap URL.
    pub sitemap: String,
}

/// Builds the crawler policy for the configured environment.
///
/// Production lets crawlers in everywhere except private areas; every
/// other environment shuts them out entirely.
#[must_use]
pub fn robots_policy(site: &SiteConfig) -> RobotsPolicy {
    let rule = if site.deploy_env.is_production() {
        RobotsRule {
            user_agent: "*".to_string(),
            allow: vec!["/".to_string()],
            disallow: PRODUCTION_DISALLOW.iter().map(|p| (*p).to_string()).collect(),
        }
    } else {
        RobotsRule {
            user_agent: "*".to_string(),
            allow: Vec::new(),
            disallow: vec!["/".to_string()],
        }
    };
    RobotsPolicy {
        rules: vec![rule],
        sitemap: site.url("/sitemap.xml"),
    }
}

impl RobotsPolicy {
    /// Renders the policy in `robots.txt` format.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            let _ = writeln!(out, "User-agent: {}", rule.user_agent);
            for path in &rule.allow {
                let _ = writeln!(out, "Allow: {path}");
            }
            for path in &rule.disallow {
                let _ = writeln!(out, "Disallow: {path}");
            }
            out.push('\n');
        }
        let _ = writeln!(out, "Sitemap: {}", self.sitemap);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeployEnv;

    fn site(env: DeployEnv) -> SiteConfig {
        SiteConfig::new(None, None, env)
    }

    #[test]
    fn production_disallows_private_areas_only() {
        let policy = robots_policy(&site(DeployEnv::Production));
        assert_eq!(policy.rules.len(), 1);
        let Some(rule) = policy.rules.first() else {
            return;
        };
        assert_eq!(rule.user_agent, "*");
        assert_eq!(rule.allow, vec!["/"]);
        assert_eq!(
            rule.disallow,
            vec!["/api/", "/admin/", "/dashboard/", "/business/dashboard/"]
        );
    }

    #[test]
    fn non_production_disallows_everything() {
        for env in [DeployEnv::Preview, DeployEnv::Development] {
            let policy = robots_policy(&site(env));
            assert!(policy.rules.iter().all(|r| r.disallow == vec!["/"] && r.allow.is_empty()));
        }
    }

    #[test]
    fn sitemap_follows_base_url() {
        assert_eq!(
            robots_policy(&site(DeployEnv::Development)).sitemap,
            "https://www.costfinders.ai/sitemap.xml"
        );
        let custom = SiteConfig::new(
            None,
            Some("https://preview.costfinders.ai/"),
            DeployEnv::Preview,
        );
        assert_eq!(
            robots_policy(&custom).sitemap,
            "https://preview.costfinders.ai/sitemap.xml"
        );
    }

    #[test]
    fn renders_robots_txt() {
        let text = robots_policy(&site(DeployEnv::Development)).render();
        assert_eq!(
            text,
            "User-agent: *\nDisallow: /\n\nSitemap: https://www.costfinders.ai/sitemap.xml\n"
        );

        let text = robots_policy(&site(DeployEnv::Production)).render();
        assert!(text.contains("Allow: /\n"));
        assert!(text.contains("Disallow: /business/dashboard/\n"));
    }
}
