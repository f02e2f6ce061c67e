//! Browser implementation of `api::Transport`.
//!
//! Client-side (hydrate): real `fetch` calls via `gloo-net`.
//! Server-side (SSR): every request fails with a network error, since the
//! backend is only ever called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Only "no response" conditions become `TransportError`; status codes and
//! bodies are passed through untouched for the `api` clients to interpret.
//!
//! CANCELLATION
//! ============
//! Each `fetch` carries its own `AbortController`. Dropping the send future
//! before the body is read (a superseded chat request, an unmounted page)
//! aborts the browser request instead of letting it run to completion.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use api::{HttpRequest, HttpResponse, Transport, TransportError};

/// Stateless `fetch`-backed transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        send_request(request).await
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn request_build_failed(err: impl std::fmt::Display) -> TransportError {
    TransportError::Request(err.to_string())
}

#[cfg(any(test, feature = "hydrate"))]
fn fetch_failed(err: impl std::fmt::Display) -> TransportError {
    TransportError::Network(err.to_string())
}

#[cfg(any(test, feature = "hydrate"))]
/// Runs its cancel action on drop unless disarmed first.
pub(crate) struct CancelOnDrop<F: FnOnce()> {
    cancel: Option<F>,
}

#[cfg(any(test, feature = "hydrate"))]
impl<F: FnOnce()> CancelOnDrop<F> {
    pub(crate) fn new(cancel: F) -> Self {
        Self { cancel: Some(cancel) }
    }

    /// The guarded work finished; dropping no longer cancels.
    pub(crate) fn disarm(mut self) {
        self.cancel = None;
    }
}

#[cfg(any(test, feature = "hydrate"))]
impl<F: FnOnce()> Drop for CancelOnDrop<F> {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(feature = "hydrate")]
async fn send_request(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    use api::http::{Method, RequestBody};
    use gloo_net::http::{Request, RequestBuilder};

    let mut builder: RequestBuilder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let controller = web_sys::AbortController::new().map_err(|e| request_build_failed(format!("{e:?}")))?;
    let signal = controller.signal();
    builder = builder.abort_signal(Some(&signal));
    let guard = CancelOnDrop::new(move || controller.abort());

    let built = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart(parts) => builder.body(form_data(&parts)?),
    }
    .map_err(request_build_failed)?;

    let response = built.send().await.map_err(fetch_failed)?;
    let status = response.status();
    let content_type = response.headers().get("content-type");
    let body = response.text().await.map_err(fetch_failed)?;
    guard.disarm();
    Ok(HttpResponse { status, content_type, body })
}

#[cfg(not(feature = "hydrate"))]
async fn send_request(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let _ = request;
    Err(TransportError::Network("not available on server".to_owned()))
}

/// Build a `FormData` body. The browser picks the multipart boundary, so no
/// content-type header is set here.
#[cfg(feature = "hydrate")]
fn form_data(parts: &[api::http::FormPart]) -> Result<web_sys::FormData, TransportError> {
    use api::http::FormValue;

    let form = web_sys::FormData::new().map_err(|e| request_build_failed(format!("{e:?}")))?;
    for part in parts {
        let appended = match &part.value {
            FormValue::Text(text) => form.append_with_str(&part.name, text),
            FormValue::File { file_name, mime, bytes } => {
                let blob = bytes_to_blob(bytes, mime)?;
                form.append_with_blob_and_filename(&part.name, &blob, file_name)
            }
        };
        appended.map_err(|e| request_build_failed(format!("{e:?}")))?;
    }
    Ok(form)
}

#[cfg(feature = "hydrate")]
fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<web_sys::Blob, TransportError> {
    let array = js_sys::Uint8Array::from(bytes);
    let sequence = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&sequence, &options)
        .map_err(|e| request_build_failed(format!("{e:?}")))
}

/// Read a picked file into memory for upload.
///
/// # Errors
///
/// Returns an error string if the browser fails to read the file.
#[cfg(feature = "hydrate")]
pub async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
