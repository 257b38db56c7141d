use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use gamus_core::domain::CatalogCandidate;
use gamus_core::ports::{CatalogClient, SearchError};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::response::parse_search_response;
use crate::token::{AccessToken, TokenResponse};

/// Cliente de búsqueda contra la Spotify Web API.
///
/// Se construye una vez por proceso. El token de client-credentials se pide
/// la primera vez que hace falta y se renueva cuando está a punto de caducar
/// o cuando la API lo rechaza.
pub struct SpotifyCatalog {
  http: reqwest::Client,
  config: CatalogConfig,
  search_endpoint: Url,
  token: Mutex<Option<AccessToken>>,
}

impl SpotifyCatalog {
  pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
    let http = reqwest::Client::builder()
      .user_agent(concat!("gamus-worker/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Self::with_client(config, http)
  }

  /// Igual que [`SpotifyCatalog::new`] pero con un cliente HTTP ya construido.
  pub(crate) fn with_client(config: CatalogConfig, http: reqwest::Client) -> Result<Self, CatalogError> {
    let base = config.api_base_url.trim_end_matches('/');
    let search_endpoint = Url::parse(&format!("{base}/search"))
      .map_err(|e| CatalogError::Config(format!("invalid api_base_url {base:?}: {e}")))?;

    Ok(Self { http, config, search_endpoint, token: Mutex::new(None) })
  }

  pub(crate) fn search_url(&self, term: &str) -> Url {
    let mut url = self.search_endpoint.clone();

    url
      .query_pairs_mut()
      .append_pair("q", term)
      .append_pair("type", "artist")
      .append_pair("limit", &self.config.result_limit.to_string());

    url
  }

  async fn bearer(&self) -> Result<String, CatalogError> {
    let mut cached = self.token.lock().await;

    if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
      return Ok(token.value.clone());
    }

    let fresh = self.request_token().await?;
    let value = fresh.value.clone();
    *cached = Some(fresh);
    Ok(value)
  }

  async fn request_token(&self) -> Result<AccessToken, CatalogError> {
    debug!(token_url = %self.config.token_url, "requesting catalog access token");
    let issued_at = Instant::now();

    let resp = self
      .http
      .post(&self.config.token_url)
      .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
      .form(&[("grant_type", "client_credentials")])
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(CatalogError::Auth(format!("token endpoint returned {status}: {body}")));
    }

    let token: TokenResponse = serde_json::from_slice(&resp.bytes().await?)?;
    Ok(AccessToken::from_response(token, issued_at))
  }

  async fn search(&self, term: &str) -> Result<Vec<CatalogCandidate>, CatalogError> {
    let url = self.search_url(term);
    let bearer = self.bearer().await?;

    let resp = self.http.get(url).bearer_auth(bearer).send().await?;
    let status = resp.status();

    if status == StatusCode::UNAUTHORIZED {
      // Token revocado o caducado antes de tiempo: la próxima búsqueda pide otro.
      self.token.lock().await.take();
      return Err(CatalogError::Auth("search rejected the access token".into()));
    }

    if !status.is_success() {
      let message = resp.text().await.unwrap_or_default();
      return Err(CatalogError::Status { status: status.as_u16(), message });
    }

    let mut candidates = parse_search_response(&resp.bytes().await?)?;
    // `limit` va en la query, pero no se da por hecho que la API lo respete.
    candidates.truncate(self.config.result_limit as usize);
    Ok(candidates)
  }
}

#[async_trait]
impl CatalogClient for SpotifyCatalog {
  async fn search_artist(&self, term: &str) -> Result<Vec<CatalogCandidate>, SearchError> {
    match self.search(term).await {
      Ok(candidates) => {
        info!(search_term = term, results = candidates.len(), "catalog search completed");
        Ok(candidates)
      }
      Err(e) => {
        warn!(search_term = term, error = %e, "catalog search failed");
        Err(e.into())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::VecDeque;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::{Arc, Mutex as StdMutex};
  use tokio::io::{AsyncReadExt, AsyncWriteExt};
  use tokio::net::{TcpListener, TcpStream};

  const DAFT_PUNK: &str = r#"{"artists":{"items":[
    {"name":"Daft Punk Tribute","uri":"spotify:artist:tribute","popularity":12},
    {"name":"Daft Punk","uri":"spotify:artist:4tZwfgrHOc3mvqYlEYSvVi","genres":["french house"],
     "images":[{"url":"https://i.scdn.co/image/big.jpg"}],"popularity":83}
  ]}}"#;

  fn config(base: &str) -> CatalogConfig {
    CatalogConfig {
      client_id: "id".into(),
      client_secret: "secret".into(),
      token_url: format!("{base}/api/token"),
      api_base_url: format!("{base}/v1"),
      ..CatalogConfig::default()
    }
  }

  /// Respuestas que da el servidor falso.
  struct Script {
    token_status: u16,
    expires_in: u64,
    /// Respuestas de `/v1/search` en orden; agotadas, responde `DAFT_PUNK`.
    search_replies: VecDeque<(u16, &'static str)>,
  }

  impl Default for Script {
    fn default() -> Self {
      Script { token_status: 200, expires_in: 3600, search_replies: VecDeque::new() }
    }
  }

  /// Servidor HTTP/1.1 mínimo con `POST /api/token` y `GET /v1/search`.
  struct FakeSpotify {
    base: String,
    token_requests: Arc<AtomicUsize>,
    search_bearers: Arc<StdMutex<Vec<String>>>,
  }

  impl FakeSpotify {
    async fn start(script: Script) -> Self {
      let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
      let base = format!("http://{}", listener.local_addr().unwrap());
      let token_requests = Arc::new(AtomicUsize::new(0));
      let search_bearers = Arc::new(StdMutex::new(Vec::new()));

      let script = StdMutex::new(script);
      let (tokens, bearers) = (token_requests.clone(), search_bearers.clone());
      tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
          let Some(head) = read_request(&mut stream).await else { continue };
          let (status, body) = respond(&head, &script, &tokens, &bearers);
          let reply = format!(
            "HTTP/1.1 {status} Fake\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
          );
          let _ = stream.write_all(reply.as_bytes()).await;
          let _ = stream.shutdown().await;
        }
      });

      FakeSpotify { base, token_requests, search_bearers }
    }

    fn catalog(&self, result_limit: u32) -> SpotifyCatalog {
      let http = reqwest::Client::builder().no_proxy().build().unwrap();
      SpotifyCatalog::with_client(CatalogConfig { result_limit, ..config(&self.base) }, http).unwrap()
    }

    fn token_requests(&self) -> usize {
      self.token_requests.load(Ordering::SeqCst)
    }

    fn bearers(&self) -> Vec<String> {
      self.search_bearers.lock().unwrap().clone()
    }
  }

  fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().skip(1).find_map(|line| {
      let (key, value) = line.split_once(':')?;
      key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
    })
  }

  /// Lee cabeceras y cuerpo; devuelve solo las cabeceras.
  async fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let end = loop {
      let n = stream.read(&mut chunk).await.ok()?;
      if n == 0 {
        return None;
      }
      buf.extend_from_slice(&chunk[..n]);
      if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
        break end;
      }
    };

    let head = String::from_utf8_lossy(&buf[..end]).into_owned();
    let body_len: usize = header(&head, "content-length").and_then(|v| v.parse().ok()).unwrap_or(0);
    while buf.len() < end + 4 + body_len {
      let n = stream.read(&mut chunk).await.ok()?;
      if n == 0 {
        break;
      }
      buf.extend_from_slice(&chunk[..n]);
    }

    Some(head)
  }

  fn respond(
    head: &str,
    script: &StdMutex<Script>,
    tokens: &AtomicUsize,
    bearers: &StdMutex<Vec<String>>,
  ) -> (u16, String) {
    let request_line = head.lines().next().unwrap_or_default();
    let mut script = script.lock().unwrap();

    if request_line.starts_with("POST /api/token") {
      let n = tokens.fetch_add(1, Ordering::SeqCst) + 1;
      let body = format!(r#"{{"access_token":"tok-{n}","token_type":"Bearer","expires_in":{}}}"#, script.expires_in);
      (script.token_status, body)
    } else if request_line.starts_with("GET /v1/search?") {
      bearers.lock().unwrap().push(header(head, "authorization").unwrap_or_default().to_string());
      let (status, body) = script.search_replies.pop_front().unwrap_or((200, DAFT_PUNK));
      (status, body.to_string())
    } else {
      (404, String::new())
    }
  }

  #[test]
  fn search_url_carries_term_type_and_limit() {
    let catalog = SpotifyCatalog::new(config("https://api.spotify.com")).unwrap();

    let url = catalog.search_url("Sigur Rós & co");

    assert_eq!(url.path(), "/v1/search");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
      pairs,
      vec![
        ("q".to_string(), "Sigur Rós & co".to_string()),
        ("type".to_string(), "artist".to_string()),
        ("limit".to_string(), "5".to_string()),
      ]
    );
  }

  #[test]
  fn bad_base_url_fails_at_construction() {
    let cfg = CatalogConfig { api_base_url: "not a url".into(), ..config("https://api.spotify.com") };

    assert!(matches!(SpotifyCatalog::new(cfg), Err(CatalogError::Config(_))));
  }

  #[tokio::test]
  async fn unreachable_token_endpoint_is_a_transport_failure() {
    // Puerto reservado: la conexión se rechaza sin salir de la máquina.
    let catalog = SpotifyCatalog::new(config("http://127.0.0.1:9")).unwrap();

    let err = catalog.search_artist("Daft Punk").await.unwrap_err();

    assert!(matches!(err, SearchError::Transport(_)));
  }

  #[tokio::test]
  async fn search_parses_candidates_and_reuses_the_token() {
    let server = FakeSpotify::start(Script::default()).await;
    let catalog = server.catalog(5);

    let first = catalog.search_artist("Daft Punk").await.unwrap();
    let second = catalog.search_artist("Daft Punk").await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first[1].uri, "spotify:artist:4tZwfgrHOc3mvqYlEYSvVi");
    assert_eq!(first[1].popularity, 83);
    assert_eq!(second, first);
    assert_eq!(server.token_requests(), 1);
    assert_eq!(server.bearers(), vec!["Bearer tok-1", "Bearer tok-1"]);
  }

  #[tokio::test]
  async fn short_lived_token_is_requested_again() {
    let server = FakeSpotify::start(Script { expires_in: 30, ..Script::default() }).await;
    let catalog = server.catalog(5);

    catalog.search_artist("Daft Punk").await.unwrap();
    catalog.search_artist("Daft Punk").await.unwrap();

    assert_eq!(server.token_requests(), 2);
  }

  #[tokio::test]
  async fn rejected_token_is_dropped_and_renewed() {
    let server = FakeSpotify::start(Script { search_replies: [(401, "")].into(), ..Script::default() }).await;
    let catalog = server.catalog(5);

    let err = catalog.search_artist("Daft Punk").await.unwrap_err();
    assert!(matches!(err, SearchError::Auth(_)));

    catalog.search_artist("Daft Punk").await.unwrap();

    assert_eq!(server.token_requests(), 2);
    assert_eq!(server.bearers(), vec!["Bearer tok-1", "Bearer tok-2"]);
  }

  #[tokio::test]
  async fn error_status_is_a_remote_failure() {
    let server = FakeSpotify::start(Script { search_replies: [(503, "busy")].into(), ..Script::default() }).await;

    let err = server.catalog(5).search_artist("Daft Punk").await.unwrap_err();

    assert!(matches!(err, SearchError::Remote { status: 503, ref message } if message == "busy"));
  }

  #[tokio::test]
  async fn token_endpoint_rejection_is_an_auth_failure() {
    let server = FakeSpotify::start(Script { token_status: 400, ..Script::default() }).await;

    let err = server.catalog(5).search_artist("Daft Punk").await.unwrap_err();

    assert!(matches!(err, SearchError::Auth(_)));
    assert!(server.bearers().is_empty());
  }

  #[tokio::test]
  async fn results_beyond_the_limit_are_dropped() {
    let server = FakeSpotify::start(Script::default()).await;

    let candidates = server.catalog(1).search_artist("Daft Punk").await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].uri, "spotify:artist:tribute");
  }
}
