pub mod client;
pub mod edit;
pub mod generate;
pub mod types;

pub use edit::GeminiEditClient;
pub use generate::GeminiGenerateClient;

/// Adds a test-only `with_base_url` builder that forwards to the inner
/// `GeminiHttpClient`, for pointing a client at a wiremock server.
#[cfg(test)]
macro_rules! impl_with_gemini_base_url {
    ($client:ty) => {
        impl $client {
            pub(crate) fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}

#[cfg(test)]
pub(crate) use impl_with_gemini_base_url;
