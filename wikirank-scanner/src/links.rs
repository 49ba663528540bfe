use crate::page::PageId;
use crate::source::{HttpSource, LinkExtractor};
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Href fragments that disqualify a link: anchors, namespaces, query strings,
/// red links, off-site hosts, the main page and the maintenance pages the
/// site's robots policy asks crawlers to stay out of.
const RESTRICTED: &[&str] = &[
    "trap",
    "/wiki/Special",
    "/wiki/Wikipedia:Articles_for_deletion",
    "/wiki/Wikipedia:Votes_for_deletion",
    "/wiki/Wikipedia:Pages_for_deletion",
    "/wiki/Wikipedia:Miscellany_for_deletion",
    "/wiki/Wikipedia:Miscellaneous_deletion",
    "/wiki/Wikipedia:Copyright_problems",
    "/wiki/Wikipedia:Protected_titles",
    "/wiki/Wikipedia:WikiProject_Spam",
    "/wiki/MediaWiki:Spam-blacklist",
    "/wiki/MediaWiki_talk:Spam-blacklist",
    "/wiki/Portal:Prepared_stories",
    "/wiki/Wikibooks:Votes_for_deletion",
    "/wiki/Wikipedia:Requests_for_arbitration",
    "redlink=1",
    "/wiki/Main_Page",
    ".org",
    ".net",
    ".com",
    "#",
    ":",
    "&",
];

const ARTICLE_PREFIX: &str = "/wiki/";

/// Pulls same-site article links out of a page's body paragraphs.
#[derive(Debug, Clone)]
pub struct WikiLinkExtractor {
    source: HttpSource,
}

impl WikiLinkExtractor {
    pub fn new(source: HttpSource) -> Self {
        Self { source }
    }
}

impl LinkExtractor for WikiLinkExtractor {
    async fn links(&self, page: &PageId) -> Vec<PageId> {
        let url = match self.source.article_url(page) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping links of {}: {}", page, e);
                return Vec::new();
            }
        };

        match self.source.fetch_text(url).await {
            Ok(body) => {
                let links = extract_article_links(&body);
                debug!("Found {} article links on {}", links.len(), page);
                links
            }
            Err(e) => {
                warn!("Link extraction failed for {}: {}", page, e);
                Vec::new()
            }
        }
    }
}

/// Returns the distinct article links found inside `<p>` elements, in order
/// of first appearance.
pub fn extract_article_links(html: &str) -> Vec<PageId> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("p a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href")
            && is_article_link(href)
        {
            let page = PageId::new(href);
            if seen.insert(page.clone()) {
                links.push(page);
            }
        }
    }
    links
}

pub fn is_article_link(href: &str) -> bool {
    href.starts_with(ARTICLE_PREFIX)
        && href.len() > ARTICLE_PREFIX.len()
        && !RESTRICTED.iter().any(|fragment| href.contains(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn test_is_article_link_filters() {
        assert!(is_article_link("/wiki/Graph_theory"));
        assert!(!is_article_link("/wiki/"));
        assert!(!is_article_link("/wiki/Graph_theory#History"));
        assert!(!is_article_link("/wiki/Help:Contents"));
        assert!(!is_article_link("/wiki/Special:Random"));
        assert!(!is_article_link("/wiki/Main_Page"));
        assert!(!is_article_link("/w/index.php?title=Foo&action=edit&redlink=1"));
        assert!(!is_article_link("https://example.com/wiki/Foo"));
        assert!(!is_article_link("//commons.wikimedia.org/wiki/Foo"));
        assert!(!is_article_link("/wiki/AT&T"));
    }

    #[test]
    fn test_extract_only_paragraph_links() {
        let html = r#"<html><body>
            <div class="sidebar"><a href="/wiki/Sidebar_Link">side</a></div>
            <p>Intro to <a href="/wiki/Graph_theory">graphs</a> and
               <a href="/wiki/Markov_chain">chains</a>.</p>
            <p>Again <a href="/wiki/graph_theory">graphs</a>,
               <a href="/wiki/Help:Editing">help</a>,
               <a class="new" href="/w/index.php?title=Missing&amp;redlink=1">missing</a>.</p>
        </body></html>"#;

        let links = extract_article_links(html);
        assert_eq!(
            links,
            vec![PageId::new("/wiki/graph_theory"), PageId::new("/wiki/markov_chain")]
        );
        assert_eq!(links[0].raw(), "/wiki/Graph_theory");
    }

    #[tokio::test]
    async fn test_links_from_server() {
        let mock_server = MockServer::start().await;
        let body = r#"<html><body><p><a href="/wiki/One">1</a> <a href="/wiki/Two">2</a></p>"#;
        Mock::given(method("GET"))
            .and(path("/wiki/Seed"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(body),
            )
            .mount(&mock_server)
            .await;

        let extractor = WikiLinkExtractor::new(HttpSource::new(&mock_server.uri()).unwrap());
        let links = extractor.links(&PageId::new("/wiki/Seed")).await;
        assert_eq!(links, vec![PageId::new("/wiki/one"), PageId::new("/wiki/two")]);
    }

    #[tokio::test]
    async fn test_links_degrade_to_empty_on_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let extractor = WikiLinkExtractor::new(HttpSource::new(&mock_server.uri()).unwrap());
        assert!(extractor.links(&PageId::new("/wiki/Broken")).await.is_empty());
    }
}
