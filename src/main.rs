use captiongen::Session;
use serde::{Deserialize, Serialize};
use std::env;
use std::io::Read;
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Words generated per request when the caller does not say otherwise.
const DEFAULT_WORDS: usize = 30;

#[derive(Deserialize)]
struct GenerateRequest {
    seed: String,
    #[serde(default)]
    words: Option<usize>,
}

#[derive(Serialize)]
struct GenerateResponse {
    seed: String,
    generated: String,
    caption: String,
}

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Caption Generator</title>
<style>
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }
.cols { display: flex; gap: 1rem; }
.cols div { flex: 1; padding: 1rem; border-radius: 4px; }
.input { background: #e8f0fe; }
.output { background: #e6f4ea; }
input[type=text] { width: 100%; padding: 0.5rem; }
</style>
</head>
<body>
<h1>Caption Generator</h1>
<p>Type a few seed words and press ENTER to generate a caption.</p>
<input id="seed" type="text" placeholder="seed words...">
<div class="cols">
<div class="input"><b>Input</b><p id="in"></p></div>
<div class="output"><b>Caption</b><p id="out"></p></div>
</div>
<script>
document.getElementById('seed').addEventListener('keydown', async (e) => {
  if (e.key !== 'Enter') return;
  const seed = e.target.value.trim();
  if (!seed) return;
  const resp = await fetch('/generate', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify({seed})
  });
  if (!resp.ok) { document.getElementById('out').textContent = 'error'; return; }
  const data = await resp.json();
  document.getElementById('in').textContent = data.seed;
  document.getElementById('out').textContent = data.caption;
});
</script>
</body>
</html>
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <checkpoint> <vocab> [options]", args[0]);
        eprintln!("Options:");
        eprintln!("  --port <int>      Port to listen on (default: 3030)");
        eprintln!("  --words <int>     Words per caption (default: 30)");
        std::process::exit(1);
    }

    let checkpoint_path = &args[1];
    let vocab_path = &args[2];

    // Parse optional arguments
    let mut port = 3030u16;
    let mut words = DEFAULT_WORDS;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                port = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(3030);
                i += 2;
            }
            "--words" => {
                words = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_WORDS);
                i += 2;
            }
            _ => i += 1,
        }
    }

    // Load model and vocabulary once; the session is shared read-only
    eprintln!("Loading model from: {}", checkpoint_path);
    let session = Session::load(checkpoint_path, vocab_path)?;
    eprintln!(
        "Loaded {} vocabulary words, window length {}",
        session.vocab().len(),
        session.window()
    );

    let session = Arc::new(session);
    let addr = format!("0.0.0.0:{}", port);
    let server = Server::http(&addr)
        .map_err(|e| std::io::Error::other(format!("server bind error: {}", e)))?;
    eprintln!("Caption demo running on http://{}", addr);

    for request in server.incoming_requests() {
        let session = session.clone();
        // Thread per request; generation is read-only on the session
        thread::spawn(move || handle(request, &session, words));
    }

    Ok(())
}

fn handle(mut req: Request, session: &Session, default_words: usize) {
    let url = req.url().to_string();
    let method = req.method().clone();

    if method == Method::Get && url == "/" {
        let response = Response::from_string(INDEX_HTML).with_header(content_type("text/html"));
        let _ = req.respond(response);
        return;
    }

    if method == Method::Get && url == "/health" {
        let _ = req.respond(Response::from_string("OK"));
        return;
    }

    if method == Method::Post && url == "/generate" {
        let mut body = String::new();
        if req.as_reader().read_to_string(&mut body).is_err() {
            let _ = req.respond(bad_request());
            return;
        }
        let Ok(gen_req) = serde_json::from_str::<GenerateRequest>(&body) else {
            let _ = req.respond(bad_request());
            return;
        };

        // Empty seed is rejected at the boundary; the loop itself would
        // happily predict from padding alone
        let seed = gen_req.seed.trim().to_string();
        if seed.is_empty() {
            let _ = req.respond(bad_request());
            return;
        }

        let n_words = gen_req.words.unwrap_or(default_words);
        match session.generate(&seed, n_words) {
            Ok(generated) => {
                let caption = if generated.is_empty() {
                    seed.clone()
                } else {
                    format!("{} {}", seed, generated)
                };
                let reply = GenerateResponse {
                    seed,
                    generated,
                    caption,
                };
                match serde_json::to_string(&reply) {
                    Ok(json) => {
                        let response = Response::from_string(json)
                            .with_header(content_type("application/json"));
                        let _ = req.respond(response);
                    }
                    Err(_) => {
                        let _ = req.respond(server_error("serialization failed"));
                    }
                }
            }
            Err(e) => {
                let _ = req.respond(server_error(&e.to_string()));
            }
        }
        return;
    }

    let _ = req.respond(Response::from_string("Not Found").with_status_code(StatusCode(404)));
}

fn content_type(value: &str) -> Header {
    // Static header values, parse cannot fail
    Header::from_bytes(&b"Content-Type"[..], value.as_bytes()).unwrap()
}

fn bad_request() -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string("Bad Request").with_status_code(StatusCode(400))
}

fn server_error(msg: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(msg.to_string()).with_status_code(StatusCode(500))
}
