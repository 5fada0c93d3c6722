//! Image URL rewriting.

use smartcity_common::ImageConfig;

use crate::models::{EventBanner, FloodReport};

/// Rewrites an unreachable host prefix on image URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRewrite {
    from: String,
    to: String,
}

impl ImageRewrite {
    /// Create a rewrite from `from` to `to`.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Rewrite that leaves every URL untouched.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new("", "")
    }

    /// Build from configuration.
    #[must_use]
    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(&config.rewrite_from, &config.rewrite_to)
    }

    /// Rewrite a single URL. Blank URLs become `None`.
    #[must_use]
    pub fn apply(&self, url: Option<&str>) -> Option<String> {
        let url = url.map(str::trim).filter(|u| !u.is_empty())?;
        if self.from.is_empty() {
            return Some(url.to_string());
        }
        Some(url.replace(&self.from, &self.to))
    }
}

/// Records carrying an image URL.
pub trait HasImage {
    /// Mutable access to the image URL.
    fn image_url_mut(&mut self) -> &mut Option<String>;
}

impl HasImage for FloodReport {
    fn image_url_mut(&mut self) -> &mut Option<String> {
        &mut self.image_url
    }
}

impl HasImage for EventBanner {
    fn image_url_mut(&mut self) -> &mut Option<String> {
        &mut self.image_url
    }
}

impl ImageRewrite {
    /// Rewrite the image URL of every record in place.
    pub fn apply_all<T: HasImage>(&self, records: &mut [T]) {
        for record in records {
            let slot = record.image_url_mut();
            *slot = self.apply(slot.as_deref());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::status::FloodReportStatus;

    fn report(url: Option<&str>) -> FloodReport {
        FloodReport {
            id: 1,
            title: "Ngập".to_string(),
            description: None,
            address: None,
            latitude: None,
            longitude: None,
            image_url: url.map(ToString::to_string),
            status: FloodReportStatus::Pending,
            water_level: None,
            admin_note: None,
            user: None,
            created_at: None,
        }
    }

    #[test]
    fn test_rewrites_emulator_alias() {
        let rewrite = ImageRewrite::new("http://10.0.2.2:5000", "http://localhost:5000");
        assert_eq!(
            rewrite.apply(Some("http://10.0.2.2:5000/uploads/a.jpg")).unwrap(),
            "http://localhost:5000/uploads/a.jpg"
        );
        assert_eq!(
            rewrite.apply(Some("https://cdn.example.com/a.jpg")).unwrap(),
            "https://cdn.example.com/a.jpg"
        );
        assert!(rewrite.apply(Some("   ")).is_none());
        assert!(rewrite.apply(None).is_none());
    }

    #[test]
    fn test_disabled_rewrite_keeps_url() {
        let rewrite = ImageRewrite::disabled();
        assert_eq!(
            rewrite.apply(Some("http://10.0.2.2:5000/a.jpg")).unwrap(),
            "http://10.0.2.2:5000/a.jpg"
        );
    }

    #[test]
    fn test_apply_all() {
        let rewrite = ImageRewrite::new("http://10.0.2.2:5000", "http://localhost:5000");
        let mut reports = vec![report(Some("http://10.0.2.2:5000/x.png")), report(Some(""))];
        rewrite.apply_all(&mut reports);
        assert_eq!(
            reports[0].image_url.as_deref(),
            Some("http://localhost:5000/x.png")
        );
        assert!(reports[1].image_url.is_none());
    }
}
