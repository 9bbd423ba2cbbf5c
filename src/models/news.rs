use serde::{Deserialize, Serialize};

/// A market news item from the news feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    /// ISO-8601 timestamp as published by the feed
    pub timestamp: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Query parameters for the news listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsQueryParams {
    pub limit: Option<usize>,
}

/// Fixed news set used when the live feed returned nothing
pub fn demo_news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: "1".to_string(),
            title: "Fed Signals Potential Rate Cut in Q3".to_string(),
            summary: "Federal Reserve officials hinted at a possible interest rate reduction if inflation data continues to cool, sparking a rally in tech stocks.".to_string(),
            source: "Global Finance".to_string(),
            timestamp: "2023-10-27T10:00:00Z".to_string(),
            url: Some("https://example.com/news/1".to_string()),
        },
        NewsItem {
            id: "2".to_string(),
            title: "Semiconductor Sector Faces Supply Chain Snags".to_string(),
            summary: "Major chip manufacturers report delays in raw material shipments, potentially impacting Q4 earnings guidance.".to_string(),
            source: "Tech Daily".to_string(),
            timestamp: "2023-10-27T09:30:00Z".to_string(),
            url: Some("https://example.com/news/2".to_string()),
        },
        NewsItem {
            id: "3".to_string(),
            title: "Green Energy Subsidies Renewed".to_string(),
            summary: "Government announces extension of tax credits for solar and wind energy projects for another 5 years.".to_string(),
            source: "Eco Markets".to_string(),
            timestamp: "2023-10-26T14:15:00Z".to_string(),
            url: Some("https://example.com/news/3".to_string()),
        },
    ]
}
