use std::{
    collections::BTreeMap,
    fs,
    path::{Component, Path, PathBuf},
};

use tracing::debug;

use crate::{Options, config::Settings, error::Error};

const OPEN: &[u8] = b"{%";
const CLOSE: &[u8] = b"%}";

pub fn render(opts: &mut Options, settings: &Settings) -> Result<Vec<u8>, Error> {
    opts.track(&settings.shell);
    let template = fs::read(&settings.shell).map_err(|source| Error::AssetRead {
        path: settings.shell.clone(),
        source,
    })?;
    Renderer {
        opts,
        path: &settings.shell,
        graphics: &settings.graphics,
        vars: &settings.vars,
    }
    .render(&template)
}

struct Renderer<'a> {
    opts: &'a mut Options,
    path: &'a Path,
    graphics: &'a Path,
    vars: &'a BTreeMap<String, String>,
}

impl Renderer<'_> {
    fn render(&mut self, template: &[u8]) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(template.len());
        let mut rest = template;
        let mut line = 1;
        while let Some(start) = find(rest, OPEN) {
            let mut text = &rest[..start];
            line += count_lines(text);

            let mut action = &rest[start + OPEN.len()..];
            let trim_before = is_trim_marker(action.first(), action.get(1));
            if trim_before {
                action = &action[1..];
                text = text.trim_ascii_end();
            }
            out.extend_from_slice(text);

            let Some(end) = find_close(action) else {
                return Err(self.error(line, "unclosed action"));
            };
            rest = &action[end + CLOSE.len()..];
            action = &action[..end];
            let mut trimmed_lines = 0;
            if let [.., before, b'-'] = action {
                if before.is_ascii_whitespace() {
                    action = &action[..action.len() - 1];
                    let trimmed = rest.trim_ascii_start();
                    trimmed_lines = count_lines(&rest[..rest.len() - trimmed.len()]);
                    rest = trimmed;
                }
            }

            self.eval(action, line, &mut out)?;
            line += count_lines(action) + trimmed_lines;
        }
        out.extend_from_slice(rest);
        Ok(out)
    }

    fn eval(&mut self, action: &[u8], line: usize, out: &mut Vec<u8>) -> Result<(), Error> {
        let action = std::str::from_utf8(action)
            .map_err(|_| self.error(line, "action is not valid UTF-8"))?
            .trim();
        if action.starts_with("/*") && action.ends_with("*/") && action.len() >= 4 {
            return Ok(());
        }
        if action.is_empty() {
            return Err(self.error(line, "missing value for command"));
        }
        if let Some(name) = action.strip_prefix('.') {
            let value = self
                .vars
                .get(name)
                .ok_or_else(|| self.error(line, format!("undefined variable {name:?}")))?;
            out.extend_from_slice(htmlescape::encode_minimal(value).as_bytes());
            return Ok(());
        }

        let (function, args) = action
            .split_once(char::is_whitespace)
            .map(|(function, args)| (function, args.trim()))
            .unwrap_or((action, ""));
        match function {
            "inline" => {
                if args.is_empty() {
                    return Err(self.error(line, "inline expects 1 argument"));
                }
                let file = parse_string(args)
                    .ok_or_else(|| self.error(line, "inline expects a quoted file name"))?;
                let bytes = self.inline(&file, line)?;
                debug!(file = %file, len = bytes.len(), "inlined into shell");
                out.extend_from_slice(&bytes);
                Ok(())
            }
            _ => Err(self.error(line, format!("function {function:?} not defined"))),
        }
    }

    fn inline(&mut self, file: &str, line: usize) -> Result<Vec<u8>, Error> {
        let relative = PathBuf::from(file);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if file.is_empty() || !contained {
            return Err(self.error(
                line,
                format!("{file:?} is not a file inside {}", self.graphics.display()),
            ));
        }
        let path = self.graphics.join(relative);
        self.opts.track(&path);
        fs::read(&path).map_err(|err| {
            self.error(
                line,
                format!("could not inline {}: {err}", path.display()),
            )
        })
    }

    fn error(&self, line: usize, message: impl Into<String>) -> Error {
        Error::TemplateRender {
            path: self.path.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}

fn is_trim_marker(dash: Option<&u8>, next: Option<&u8>) -> bool {
    dash == Some(&b'-') && next.is_some_and(u8::is_ascii_whitespace)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Position of the `%}` closing an action, skipping over quoted strings and
/// comments.
fn find_close(action: &[u8]) -> Option<usize> {
    let mut quoted = false;
    let mut index = 0;
    while index < action.len() {
        let rest = &action[index..];
        match rest[0] {
            b'\\' if quoted => index += 1,
            b'"' => quoted = !quoted,
            _ if quoted => {}
            _ if rest.starts_with(CLOSE) => return Some(index),
            _ if rest.starts_with(b"/*") => index += find(&rest[2..], b"*/")? + 3,
            _ => {}
        }
        index += 1;
    }
    None
}

fn count_lines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// A double-quoted literal with `\"` and `\\` escapes, nothing after it.
fn parse_string(arg: &str) -> Option<String> {
    let inner = arg.strip_prefix('"')?;
    let mut value = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return chars.as_str().is_empty().then_some(value),
            '\\' => match chars.next()? {
                escaped @ ('"' | '\\') => value.push(escaped),
                _ => return None,
            },
            c => value.push(c),
        }
    }
    None
}
