mod image_cdn_port;
mod image_fetcher_port;

pub use image_cdn_port::ImageCdn;
pub use image_fetcher_port::{ImageFetcherPort, ImageResult};
