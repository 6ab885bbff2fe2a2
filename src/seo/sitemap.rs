//! XML sitemap built from the city directory.

use std::fmt::Write as _;

use crate::config::SiteConfig;
use crate::domain::DirectoryCity;

/// Pages listed regardless of directory contents, with their priority.
const STATIC_PAGES: [(&str, &str); 2] = [("/", "1.0"), ("/deals", "0.8")];

/// Renders `sitemap.xml` for the static pages and every directory city.
#[must_use]
pub fn build_sitemap(site: &SiteConfig, cities: &[DirectoryCity]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for (path, priority) in STATIC_PAGES {
        push_url(&mut out, &site.url(path), "daily", priority);
    }
    for city in cities {
        let loc = site.url(&format!("/cities/{}", city.city.id));
        push_url(&mut out, &loc, "daily", "0.7");
    }
    out.push_str("</urlset>\n");
    out
}

fn push_url(out: &mut String, loc: &str, changefreq: &str, priority: &str) {
    let _ = writeln!(
        out,
        "  <url><loc>{}</loc><changefreq>{changefreq}</changefreq><priority>{priority}</priority></url>",
        escape_xml(loc)
    );
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{City, CityId, Coordinates};

    fn directory_city() -> DirectoryCity {
        DirectoryCity {
            city: City {
                id: CityId::new(),
                name: "Austin".into(),
                state: "Texas".into(),
                state_code: "TX".into(),
                coordinates: Coordinates {
                    latitude: 30.27,
                    longitude: -97.74,
                },
                timezone: "America/Chicago".into(),
                is_active: true,
            },
            offer_count: 1,
        }
    }

    #[test]
    fn lists_static_pages_and_cities() {
        let site = SiteConfig::default();
        let city = directory_city();
        let xml = build_sitemap(&site, std::slice::from_ref(&city));

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://www.costfinders.ai/</loc>"));
        assert!(xml.contains("<loc>https://www.costfinders.ai/deals</loc>"));
        assert!(xml.contains(&format!(
            "<loc>https://www.costfinders.ai/cities/{}</loc>",
            city.city.id
        )));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn escapes_markup_in_urls() {
        assert_eq!(escape_xml("https://x.test/?a=1&b=<2>"), "https://x.test/?a=1&amp;b=&lt;2&gt;");
    }
}
