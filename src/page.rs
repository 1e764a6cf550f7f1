use eyre::{bail, Result, WrapErr};
use reqwest::Client;
use scraper::Html;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

use crate::{CharacteristicsWidget, Selectors};

#[derive(Debug, Default)]
/// Every characteristics widget found on a page.
///
/// Use `Page::parse` for markup already at hand, `Page::load` for a file and
/// `Page::fetch` for a page served over HTTP.
pub struct Page {
    /// Initialized widgets, in document order.
    pub widgets: Vec<CharacteristicsWidget>,
    /// One message per widget container that was skipped.
    pub diagnostics: Vec<String>,
}

impl Page {
    /// Finds and initializes every widget in `html`.
    ///
    /// A container missing one of its parts is skipped with a diagnostic; it
    /// does not affect the other widgets and is not an error.
    pub fn parse(html: &str, selectors: &Selectors) -> Result<Self> {
        let selectors = selectors.compile()?;
        let document = Html::parse_document(html);

        let mut page = Page::default();
        for (index, container) in document.select(&selectors.container).enumerate() {
            match CharacteristicsWidget::from_container(container, &selectors) {
                Ok(widget) => page.widgets.push(widget),
                Err(err) => {
                    let message = format!("skipped widget #{index}: {err}");
                    warn!("{message}");
                    page.diagnostics.push(message);
                }
            }
        }
        debug!(
            widgets = page.widgets.len(),
            skipped = page.diagnostics.len(),
            "page initialized"
        );
        Ok(page)
    }

    /// Reads a page from disk.
    pub fn load(path: impl AsRef<Path>, selectors: &Selectors) -> Result<Self> {
        let path = path.as_ref();
        let html = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading page {}", path.display()))?;
        Page::parse(&html, selectors)
    }

    /// Downloads a page, typically a rendered admin form.
    pub async fn fetch(url: Url, selectors: &Selectors) -> Result<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Only http and https pages can be fetched, got `{}`", url.scheme());
        }

        let client = Client::builder()
            .default_headers(crate::build_headers())
            .build()?;

        let response = client.get(url.to_owned()).send().await?;
        let status = response.status();
        if !status.is_success() {
            bail!("Fetching {url} failed with status {status}");
        }
        let body = response.text().await?;
        Page::parse(&body, selectors)
    }

    /// Looks a widget up by its field name.
    pub fn widget(&self, name: &str) -> Option<&CharacteristicsWidget> {
        self.widgets.iter().find(|widget| widget.name() == name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut CharacteristicsWidget> {
        self.widgets.iter_mut().find(|widget| widget.name() == name)
    }
}
