mod http_crawler_client;

pub use http_crawler_client::HttpCrawlerClient;
