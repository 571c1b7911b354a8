use scraper::{Html, Selector};
use tracing::debug;

use crate::error::SampleError;

/// Tag name and `id` attribute of the element holding the generated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementLocator {
    pub tag: String,
    pub id: String,
}

impl Default for ElementLocator {
    fn default() -> Self {
        Self {
            tag: "p".to_string(),
            id: "classname".to_string(),
        }
    }
}

impl ElementLocator {
    fn selector(&self) -> Result<Selector, SampleError> {
        Selector::parse(&self.tag).map_err(|e| SampleError::Selector(format!("{}: {}", self.tag, e)))
    }

    fn not_found(&self) -> SampleError {
        SampleError::ElementNotFound {
            tag: self.tag.clone(),
            id: self.id.clone(),
        }
    }
}

/// Trimmed text of the first matching element's own text nodes (markup
/// nested inside it is skipped), or `None` when there is no
/// match or the match has no text. Malformed markup is recovered, not rejected.
pub fn find_element_text(html: &str, locator: &ElementLocator) -> Result<Option<String>, SampleError> {
    let selector = locator.selector()?;
    let document = Html::parse_document(html);

    let text = document
        .select(&selector)
        .find(|element| element.value().id() == Some(locator.id.as_str()))
        .map(|element| {
            element
                .children()
                .filter_map(|node| node.value().as_text().map(|text| String::from(&**text)))
                .collect::<String>()
                .trim()
                .to_string()
        })
        .filter(|text| !text.is_empty());

    Ok(text)
}

pub fn extract_class_name(body: &[u8], locator: &ElementLocator) -> Result<String, SampleError> {
    let html = String::from_utf8(body.to_vec())?;
    let class_name = find_element_text(&html, locator)?.ok_or_else(|| locator.not_found())?;

    debug!(action = "extract", component = "extractor", class_name = %class_name, "Extracted class name");
    Ok(class_name)
}
