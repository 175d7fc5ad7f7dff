use crate::normalize;
use crate::types::{site_of, AcquiredScreenplay, SourceInfo};
use anyhow::{Context, Result};
use scraper::{Html, Selector};

/// Acquire screenplay text from a dailyscript.com-style page.
///
/// Screenplay archives in this mold serve the whole script inside a single
/// `<pre>` element surrounded by navigation chrome. Fetches the page,
/// extracts that text, and normalizes it for pagination.
pub async fn acquire(url: &str, slug: &str) -> Result<AcquiredScreenplay> {
    tracing::info!(url = %url, "Fetching screenplay");
    let html = fetch_page(url).await?;
    tracing::info!(bytes = html.len(), "Received HTML");

    let text = extract_text(&html)?;
    let text = normalize::collapse_blank_lines(&normalize::normalize_text(&text));
    tracing::info!(
        lines = text.lines().count(),
        words = text.split_whitespace().count(),
        "Extracted screenplay text"
    );

    let now = chrono::Utc::now().to_rfc3339();
    Ok(AcquiredScreenplay {
        source: SourceInfo {
            url: url.to_string(),
            site: site_of(url),
            fetched_at: now,
            slug: slug.to_string(),
        },
        text,
    })
}

async fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent("scriptwall/0.1 (screenplay wallpaper tool)")
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch page")?;

    let status = response.status();
    anyhow::ensure!(status.is_success(), "HTTP {status} for {url}");

    response.text().await.context("Failed to read response body")
}

/// Extract the screenplay text from a fetched page.
///
/// Prefers the first `<pre>` element. Pages without one fall back to
/// whole-body text with a warning; a page yielding no text at all is an
/// error rather than an empty screenplay.
pub fn extract_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);

    let pre_sel = Selector::parse("pre").expect("valid selector");
    let text = match document.select(&pre_sel).next() {
        Some(pre) => pre.text().collect::<String>(),
        None => {
            tracing::warn!("No <pre> element found, falling back to whole-body text");
            let body_sel = Selector::parse("body").expect("valid selector");
            document
                .select(&body_sel)
                .next()
                .map(|body| body.text().collect::<String>())
                .unwrap_or_default()
        }
    };

    anyhow::ensure!(
        !text.trim().is_empty(),
        "page contains no extractable screenplay text"
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_pre() {
        let html = r#"
        <html><body>
        <div class="nav">Home | Scripts | Contact</div>
        <pre>
FADE IN:

EXT. DINER - DAY

          JOHN
     Hello there.
</pre>
        <div class="footer">Copyright</div>
        </body></html>
        "#;

        let text = extract_text(html).unwrap();
        assert!(text.contains("FADE IN:"));
        assert!(text.contains("     Hello there."));
        assert!(!text.contains("Home | Scripts"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn test_extract_falls_back_to_body() {
        let html = "<html><body><p>INT. HOUSE - DAY</p><p>A room.</p></body></html>";
        let text = extract_text(html).unwrap();
        assert!(text.contains("INT. HOUSE - DAY"));
        assert!(text.contains("A room."));
    }

    #[test]
    fn test_extract_empty_page_is_error() {
        let html = "<html><body>   </body></html>";
        assert!(extract_text(html).is_err());
    }

    #[test]
    fn test_extract_empty_pre_is_error() {
        let html = "<html><body><pre>   </pre></body></html>";
        assert!(extract_text(html).is_err());
    }
}
