//! # Parsing de Requests HTTP/1.0
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.0 desde cero, en tres etapas
//! sobre un único buffer de lectura:
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.0`
//! 2. **Headers**: pares `Name: Value` en orden de llegada
//! 3. **Body**: bytes después de `\r\n\r\n`, hasta `Content-Length`
//!
//! El parsing es best-effort: una request line o un header malformado se
//! registra y se continúa con estado parcial en vez de abortar. Es el
//! handler quien rechaza requests inutilizables (por ejemplo un POST sin
//! `Content-Length` → 400).
//!
//! Limitación documentada: la request completa debe llegar en una sola
//! lectura del socket; no se soportan requests partidas en varios `recv`.

/// Máximo de headers que se almacenan por request
pub const MAX_HEADERS: usize = 100;

/// Métodos HTTP soportados
///
/// Cualquier token que no sea `GET` ni `POST` se mapea a `Unknown`;
/// el handler responde 501 en ese caso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un archivo
    Get,

    /// POST - Obtener un archivo inyectando el body en la plantilla
    Post,

    /// Cualquier otro método (no implementado)
    Unknown,
}

impl Method {
    /// Mapea el token de la request line a un método
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Unknown,
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Unknown => "UNKNOWN",
        }
    }
}

/// Errores de parsing de la request line
///
/// Solo se usan para reportar: el parser nunca aborta por ellos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// El buffer no contiene ningún `\r\n` que delimite la request line
    MissingRequestLine,

    /// La request line no tiene exactamente tres tokens
    MalformedRequestLine(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingRequestLine => write!(f, "Missing request line"),
            ParseError::MalformedRequestLine(line) => {
                write!(f, "Malformed request line: '{}'", line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Representa un request HTTP/1.0 parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST o Unknown)
    method: Method,

    /// Path ya resuelto contra el document root (ej: "./html/index.html")
    path: String,

    /// Versión del protocolo tal como llegó (ej: "HTTP/1.0")
    version: String,

    /// Headers en orden de llegada, hasta MAX_HEADERS
    headers: Vec<(String, String)>,

    /// Content-Length declarado: `None` significa "header ausente",
    /// distinto de `Some(0)`. El handler necesita esa distinción para
    /// validar POSTs.
    content_length: Option<usize>,

    /// Body del request, si el Content-Length era positivo y el
    /// delimitador estaba presente
    body: Option<Vec<u8>>,
}

impl Request {
    /// Parsea un request HTTP/1.0 desde el buffer de una sola lectura
    ///
    /// `root` es el document root que se antepone al path de la URL.
    /// Siempre retorna un `Request`: los errores se registran y dejan
    /// estado parcial (método `Unknown`, path vacío).
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use myhttp::http::{Method, Request};
    ///
    /// let raw = b"GET /a/b?x=1 HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw, "./html");
    ///
    /// assert_eq!(request.method(), Method::Get);
    /// assert_eq!(request.path(), "./html/a/b");
    /// ```
    pub fn parse(buf: &[u8], root: &str) -> Self {
        let mut request = Request {
            method: Method::Unknown,
            path: String::new(),
            version: String::new(),
            headers: Vec::new(),
            content_length: None,
            body: None,
        };

        // Separar cabecera de body por el delimitador \r\n\r\n. Si falta,
        // toda la lectura se trata como cabecera y no hay body.
        let delimiter = find_subslice(buf, b"\r\n\r\n");
        let head = match delimiter {
            Some(pos) => &buf[..pos],
            None => buf,
        };

        // La cabecera es texto; los bytes inválidos se reemplazan en vez
        // de abortar (best-effort)
        let head = String::from_utf8_lossy(head);
        let mut lines = head.split("\r\n");

        // 1. Request line
        if let Err(e) = request.parse_request_line(lines.next(), buf, root) {
            eprintln!("   ❌ {}", e);
        }

        // 2. Headers (el resto de líneas de la cabecera)
        request.parse_headers(lines);

        // 3. Body
        if let Some(pos) = delimiter {
            request.parse_body(&buf[pos + 4..]);
        }

        request
    }

    /// Etapa 1: request line
    ///
    /// Tres tokens separados por whitespace; menos o más de tres es un
    /// fallo de parseo que deja el método en `Unknown` sin abortar las
    /// etapas siguientes.
    fn parse_request_line(
        &mut self,
        line: Option<&str>,
        buf: &[u8],
        root: &str,
    ) -> Result<(), ParseError> {
        // Sin \r\n en todo el buffer no hay request line delimitada
        if find_subslice(buf, b"\r\n").is_none() {
            return Err(ParseError::MissingRequestLine);
        }

        let line = line.unwrap_or("");
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() != 3 {
            return Err(ParseError::MalformedRequestLine(line.to_string()));
        }

        self.method = Method::from_token(tokens[0]);
        self.path = resolve_path(tokens[1], root);
        self.version = tokens[2].to_string();

        Ok(())
    }

    /// Etapa 2: headers en orden de llegada
    ///
    /// Cada línea se parte en el primer `:`; el nombre es case-sensitive,
    /// al valor se le quitan los espacios iniciales. Un header sin `:` se
    /// registra y se salta. Se almacenan hasta MAX_HEADERS.
    fn parse_headers<'a>(&mut self, lines: impl Iterator<Item = &'a str>) {
        for line in lines {
            if line.is_empty() {
                break;
            }

            let Some((name, value)) = line.split_once(':') else {
                eprintln!("   ❌ Header malformado: '{}'", line);
                continue;
            };

            let value = value.trim_start();

            // Content-Length se matchea case-insensitive
            if name.eq_ignore_ascii_case("Content-Length") {
                self.content_length = Some(value.trim().parse().unwrap_or(0));
            }

            if self.headers.len() < MAX_HEADERS {
                self.headers.push((name.to_string(), value.to_string()));
            }
        }
    }

    /// Etapa 3: body
    ///
    /// Solo si el Content-Length declarado es positivo. Una lectura corta
    /// simplemente produce un body truncado, no un error.
    fn parse_body(&mut self, after_delimiter: &[u8]) {
        let Some(length) = self.content_length else {
            return;
        };

        if length == 0 {
            return;
        }

        let take = length.min(after_delimiter.len());
        self.body = Some(after_delimiter[..take].to_vec());
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path ya resuelto contra el document root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Headers en orden de llegada
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Busca un header por nombre exacto (case-sensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Content-Length declarado; `None` si el header estaba ausente
    pub fn content_length(&self) -> Option<usize> {
        self.content_length
    }

    /// Body del request, si lo hubo
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Resuelve la URL de la request line a un path de filesystem
///
/// Se descarta el query (todo desde el primer `?`), se antepone el
/// document root y, si el path termina en `/`, se le agrega `index.html`.
fn resolve_path(url: &str, root: &str) -> String {
    let url = match url.find('?') {
        Some(pos) => &url[..pos],
        None => url,
    };

    let mut path = format!("{}{}", root, url);

    if path.ends_with('/') {
        path.push_str("index.html");
    }

    path
}

/// Busca la primera ocurrencia de `needle` dentro de `haystack`
fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
