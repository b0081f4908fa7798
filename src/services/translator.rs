use crate::error::Error;

use rand::{thread_rng, Rng};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use std::{thread, time::Duration};

/// Translation backend seam. The pipeline only sees this trait, so the
/// service behind it can be swapped without touching classifier or
/// formatter code.
pub trait Translate {
    fn translate(&self, text: &str) -> Result<String, Error>;
}

const MAX_RETRIES: usize = 3;
const BASE_DELAY_MS: u64 = 800;
const TIMEOUT_SECS: u64 = 20;

/// Pause after each successful call; the free endpoint throttles bursts.
const REQUEST_GAP_MS: u64 = 300;

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Blocking client for the unofficial Google Translate web endpoint
/// (`client=gtx`). One request per string, bounded retries with jittered
/// exponential backoff on transient failures.
pub struct GoogleTranslator {
    client: Client,
    source_lang: String,
    target_lang: String,
}

impl GoogleTranslator {
    pub fn new(source_lang: &str, target_lang: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Service(e.to_string()))?;

        Ok(Self {
            client,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        })
    }
}

fn backoff(attempt: usize) -> Duration {
    let jitter: u64 = thread_rng().gen_range(0..200);
    let ms = BASE_DELAY_MS * (2_u64.pow(attempt as u32)) + jitter;
    Duration::from_millis(ms)
}

fn should_retry_http(status: StatusCode) -> bool {
    // 408/429/5xx are typically temporary
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

impl Translate for GoogleTranslator {
    fn translate(&self, text: &str) -> Result<String, Error> {
        let mut last_err = String::from("no attempt made");

        for attempt in 0..MAX_RETRIES {
            let res = self
                .client
                .get(ENDPOINT)
                .query(&[
                    ("client", "gtx"),
                    ("dt", "t"),
                    ("sl", self.source_lang.as_str()),
                    ("tl", self.target_lang.as_str()),
                    ("q", text),
                ])
                .send();

            match res {
                Ok(resp) => {
                    let status = resp.status();

                    // Read as text first so an error body is not lost when
                    // JSON decoding fails.
                    let body = match resp.text() {
                        Ok(t) => t,
                        Err(err) => {
                            last_err = err.to_string();
                            thread::sleep(backoff(attempt));
                            continue;
                        }
                    };

                    if !status.is_success() {
                        last_err = format!("HTTP {}", status.as_u16());
                        if should_retry_http(status) && attempt + 1 < MAX_RETRIES {
                            thread::sleep(backoff(attempt));
                            continue;
                        } else {
                            break;
                        }
                    }

                    match extract_translation(&body) {
                        Some(t) => {
                            thread::sleep(Duration::from_millis(REQUEST_GAP_MS));
                            return Ok(t);
                        }
                        None => {
                            last_err = "unexpected response shape".to_string();
                            if attempt + 1 < MAX_RETRIES {
                                thread::sleep(backoff(attempt));
                                continue;
                            }
                        }
                    }
                }
                Err(err) => {
                    last_err = err.to_string();
                    if attempt + 1 < MAX_RETRIES {
                        thread::sleep(backoff(attempt));
                        continue;
                    }
                }
            }
        }

        Err(Error::Service(last_err))
    }
}

/// The gtx endpoint answers with nested arrays:
/// `[[["你好 %s","Hello %s",..], ["...","...",..]], ..]`.
/// The translation is segment 0 of each chunk in array 0, concatenated.
fn extract_translation(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    let chunks = v.get(0)?.as_array()?;

    let mut out = String::new();
    for chunk in chunks {
        if let Some(seg) = chunk.get(0).and_then(|s| s.as_str()) {
            out.push_str(seg);
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_chunk() {
        let body = r#"[[["你好 %s","Hello %s",null,null,1]],null,"en"]"#;
        assert_eq!(extract_translation(body).unwrap(), "你好 %s");
    }

    #[test]
    fn concatenates_multiple_chunks() {
        let body = r#"[[["第一段。","First. ",null],["第二段。","Second.",null]],null,"en"]"#;
        assert_eq!(extract_translation(body).unwrap(), "第一段。第二段。");
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(extract_translation("{}").is_none());
        assert!(extract_translation("[[]]").is_none());
        assert!(extract_translation("not json").is_none());
    }

    #[test]
    fn backoff_grows_with_attempts() {
        assert!(backoff(0) < backoff(2));
    }

    #[test]
    fn retryable_statuses() {
        assert!(should_retry_http(StatusCode::TOO_MANY_REQUESTS));
        assert!(should_retry_http(StatusCode::BAD_GATEWAY));
        assert!(!should_retry_http(StatusCode::FORBIDDEN));
    }
}
