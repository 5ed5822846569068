//! Line-oriented catalog grammar

use cyget_errors::{CatalogError, Error};
use cyget_types::{Artifact, Catalog, Package, VersionSpec, CURRENT_SPEC};

/// Parse catalog text into a [`Catalog`]
///
/// Unknown lines are skipped. Lines are trimmed before matching.
///
/// # Errors
///
/// Returns [`CatalogError::Malformed`] when a package directive appears
/// before any `@ name` header, or when an artifact line cannot be read.
pub fn parse_catalog(text: &str) -> Result<Catalog, Error> {
    let mut parser = Parser::default();
    for (index, raw) in text.lines().enumerate() {
        parser.line(index + 1, raw.trim())?;
    }
    Ok(parser.finish())
}

#[derive(Default)]
struct Parser {
    catalog: Catalog,
    package: Option<Package>,
    spec: String,
    /// Open multi-line long description
    ldesc: Option<String>,
}

impl Parser {
    fn line(&mut self, number: usize, line: &str) -> Result<(), Error> {
        // An open long description swallows everything until its closing quote
        if let Some(buffer) = self.ldesc.as_mut() {
            if let Some(last) = line.strip_suffix('"') {
                buffer.push('\n');
                buffer.push_str(last);
                let text = std::mem::take(buffer);
                self.ldesc = None;
                if let Some(package) = self.package.as_mut() {
                    package.long_description = Some(text);
                }
            } else {
                buffer.push('\n');
                buffer.push_str(line);
            }
            return Ok(());
        }

        if let Some(name) = line.strip_prefix("@ ") {
            self.start_package(name.trim());
            return Ok(());
        }

        if let Some(spec) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let package = self.current(number, line)?;
            package
                .specs
                .insert(spec.to_string(), VersionSpec::new(spec));
            self.spec = spec.to_string();
            return Ok(());
        }

        let Some((key, value)) = line.split_once(':') else {
            return Ok(());
        };
        let value = value.trim();

        match key {
            "sdesc" => {
                self.current(number, line)?.short_description = Some(unquote(value).to_string());
            }
            "ldesc" => {
                self.current(number, line)?;
                let body = value.strip_prefix('"').unwrap_or(value);
                match body.strip_suffix('"') {
                    Some(text) if value.len() > 1 => {
                        if let Some(package) = self.package.as_mut() {
                            package.long_description = Some(text.to_string());
                        }
                    }
                    _ => self.ldesc = Some(body.to_string()),
                }
            }
            "category" => {
                self.current(number, line)?.categories = tokens(value);
            }
            "requires" => {
                self.current(number, line)?.requires = tokens(value);
            }
            "version" => {
                self.current_spec(number, line)?.version = Some(value.to_string());
            }
            "install" => {
                let artifact = artifact(number, value)?;
                self.current_spec(number, line)?.binary = Some(artifact);
            }
            "source" => {
                let artifact = artifact(number, value)?;
                self.current_spec(number, line)?.source = Some(artifact);
            }
            _ => {}
        }
        Ok(())
    }

    fn start_package(&mut self, name: &str) {
        if let Some(previous) = self.package.take() {
            self.catalog.insert(previous);
        }
        self.package = Some(Package::new(name));
        self.spec = CURRENT_SPEC.to_string();
    }

    fn current(&mut self, number: usize, line: &str) -> Result<&mut Package, Error> {
        self.package.as_mut().ok_or_else(|| {
            CatalogError::Malformed {
                line: number,
                message: format!("'{line}' appears before any package header"),
            }
            .into()
        })
    }

    fn current_spec(&mut self, number: usize, line: &str) -> Result<&mut VersionSpec, Error> {
        let spec = self.spec.clone();
        let package = self.current(number, line)?;
        Ok(package
            .specs
            .entry(spec.clone())
            .or_insert_with(|| VersionSpec::new(spec)))
    }

    fn finish(mut self) -> Catalog {
        if let Some(text) = self.ldesc.take() {
            tracing::warn!("catalog ended inside an unterminated ldesc block");
            if let Some(package) = self.package.as_mut() {
                package.long_description = Some(text);
            }
        }
        if let Some(last) = self.package.take() {
            self.catalog.insert(last);
        }
        self.catalog
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

fn tokens(value: &str) -> std::collections::BTreeSet<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn artifact(number: usize, value: &str) -> Result<Artifact, Error> {
    let malformed = |message: String| -> Error {
        CatalogError::Malformed {
            line: number,
            message,
        }
        .into()
    };

    let mut parts = value.split_whitespace();
    let (Some(path), Some(size), Some(hash)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed(format!(
            "expected '<path> <size> <hash>', got '{value}'"
        )));
    };
    let size = size
        .parse::<u64>()
        .map_err(|_| malformed(format!("invalid artifact size '{size}'")))?;

    Ok(Artifact::new(path, size, hash))
}
