#![forbid(unsafe_code)]

//! Built-in "what we do" catalog and catalog file loading.

use std::path::Path;

use scrollstage_runtime::{Catalog, ContentItem, Icon, TimelineError};

const STORY: &str = "We create and tell stories that connect with people and convey your \
brand's message in a clear, authentic way. Our creative, artistic thinkers immerse into the \
DNA of your brand to conceptualize and shape visual content that achieves your objectives and \
resonates within your target audience.";

/// The five service cards shown when no catalog file is given.
pub fn default_items() -> Vec<ContentItem> {
    vec![
        ContentItem::new(1, "Enhanced Security", "code")
            .gradient("from-pink-500 to-blue-500")
            .body(STORY)
            .features(["Responsive Design", "SEO Optimized", "Fast Loading", "Modern UI/UX"]),
        ContentItem::new(2, "Scalability & Flexibility", "smartphone")
            .gradient("from-purple-500 to-cyan-500")
            .body(STORY)
            .features([
                "Scalable Architecture",
                "Cross-Platform",
                "Offline Support",
                "Native Feel",
            ]),
        ContentItem::new(3, "Design", "palette")
            .gradient("from-orange-500 to-red-500")
            .heading("Creative Design Solutions")
            .body(
                "Transform your brand with innovative design strategies. We create visually \
                 stunning interfaces that communicate your brand story effectively while \
                 ensuring optimal user engagement and satisfaction.",
            )
            .features([
                "Brand Identity",
                "UI/UX Design",
                "Visual Strategy",
                "Creative Direction",
            ]),
        ContentItem::new(4, "Analytics", "bar-chart-3")
            .gradient("from-green-500 to-teal-500")
            .heading("Data Analytics & Insights")
            .body(
                "Unlock the power of data to drive informed decisions. Our analytics solutions \
                 provide deep insights into user behavior, performance metrics, and growth \
                 opportunities for your business.",
            )
            .features([
                "Real-time Analytics",
                "Custom Dashboards",
                "Performance Tracking",
                "Data Visualization",
            ]),
        ContentItem::new(5, "Performance", "zap")
            .gradient("from-yellow-500 to-orange-500")
            .heading("Performance Optimization")
            .body(
                "Supercharge your digital presence with lightning-fast performance. We optimize \
                 every aspect of your applications to ensure maximum speed, efficiency, and user \
                 satisfaction across all devices.",
            )
            .features([
                "Speed Optimization",
                "Core Web Vitals",
                "Mobile Performance",
                "Technical SEO",
            ]),
    ]
}

/// The built-in catalog.
pub fn default_catalog() -> Result<Catalog, TimelineError> {
    Catalog::new(default_items())
}

/// Errors from reading a catalog file.
#[derive(Debug)]
pub enum CatalogLoadError {
    Io(std::io::Error),
    /// Malformed JSON, or a list that fails catalog validation.
    Parse(serde_json::Error),
}

impl std::fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "invalid catalog: {e}"),
        }
    }
}

impl std::error::Error for CatalogLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

/// Parse a JSON array of items.
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogLoadError> {
    serde_json::from_str(text).map_err(CatalogLoadError::Parse)
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let text = std::fs::read_to_string(path).map_err(CatalogLoadError::Io)?;
    parse_catalog(&text)
}

/// Single-cell glyph for an icon name. Unknown names get a bullet.
pub fn icon_glyph(icon: &Icon) -> &'static str {
    match icon.name() {
        "code" => "</>",
        "smartphone" => "▯",
        "palette" => "◐",
        "bar-chart-3" | "bar-chart" => "▁▃▆",
        "zap" => "⚡",
        "shield" => "◆",
        _ => "•",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_five_items() {
        let catalog = default_catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        let titles: Vec<&str> = catalog.iter().map(|i| i.card.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Enhanced Security",
                "Scalability & Flexibility",
                "Design",
                "Analytics",
                "Performance"
            ]
        );
        assert_eq!(
            catalog.get(3).map(|i| i.content.heading.as_str()),
            Some("Data Analytics & Insights")
        );
        assert!(catalog.iter().all(|i| i.content.features.len() == 4));
    }

    #[test]
    fn catalog_json_round_trip() {
        let catalog = default_catalog().unwrap();
        let text = serde_json::to_string(&catalog).unwrap();
        assert_eq!(parse_catalog(&text).unwrap(), catalog);
    }

    #[test]
    fn empty_catalog_file_is_rejected() {
        let err = parse_catalog("[]").unwrap_err();
        assert!(err.to_string().contains("at least one item"), "{err}");
    }

    #[test]
    fn glyphs_cover_builtin_icons() {
        for item in default_items() {
            assert_ne!(icon_glyph(&item.card.icon), "•", "{}", item.card.icon.name());
        }
    }
}
