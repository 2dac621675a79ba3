//! Single-pass parser for the OBJ subset the viewers understand:
//! `v`, `vt`, `vn`, triangular `f` records and `#` comments.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::constants::PROGRESS_CAP;
use crate::core::mesh::{Face, FaceIndex, MeshData};
use crate::core::vertex::{TexCoord2, Vertex3};
use crate::error::{LoadError, ParseErrorKind};
use crate::render::face_index::FaceIndexResolver;

/// Output of a parse that reached the end of the stream.
#[derive(Debug, Clone, Default)]
pub struct ParsedObj {
    pub mesh: MeshData,
    pub warnings: Vec<String>,
}

/// Parser state for one pass over one stream.
pub struct ObjParser<'a> {
    cancel: &'a AtomicBool,
    total_bytes: u64,
    consumed: u64,
    last_progress: u8,
    line: usize,
    resolver: FaceIndexResolver,
    out: ParsedObj,
}

impl<'a> ObjParser<'a> {
    /// `total_bytes` is the stream length used for progress; pass 0 if unknown.
    pub fn new(cancel: &'a AtomicBool, total_bytes: u64) -> Self {
        ObjParser {
            cancel,
            total_bytes,
            consumed: 0,
            last_progress: 0,
            line: 0,
            resolver: FaceIndexResolver::new(),
            out: ParsedObj::default(),
        }
    }

    /// Runs the pass. `on_progress` receives strictly increasing values capped at 99;
    /// the caller emits the final 100. Warnings gathered before a failure stay
    /// available through `warnings`.
    pub fn parse<R, F>(&mut self, mut reader: R, mut on_progress: F) -> Result<(), LoadError>
    where
        R: BufRead,
        F: FnMut(u8),
    {
        let mut buf = Vec::new();
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(LoadError::Cancelled);
            }

            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(|source| LoadError::Read {
                line: self.line + 1,
                source,
            })?;
            if read == 0 {
                break;
            }
            self.line += 1;
            self.consumed += read as u64;

            let text = String::from_utf8_lossy(&buf);
            self.parse_record(&text)?;

            if let Some(progress) = self.progress() {
                on_progress(progress);
            }
        }

        tracing::debug!(
            lines = self.line,
            positions = self.out.mesh.positions.len(),
            faces = self.out.mesh.faces.len(),
            "OBJ pass complete"
        );
        Ok(())
    }

    pub fn warnings(&self) -> &[String] {
        &self.out.warnings
    }

    pub fn into_parsed(self) -> ParsedObj {
        self.out
    }

    fn progress(&mut self) -> Option<u8> {
        if self.total_bytes == 0 {
            return None;
        }
        let pct = (self.consumed.saturating_mul(100) / self.total_bytes).min(PROGRESS_CAP as u64) as u8;
        if pct > self.last_progress {
            self.last_progress = pct;
            Some(pct)
        } else {
            None
        }
    }

    fn parse_record(&mut self, record: &str) -> Result<(), LoadError> {
        let mut tokens = record.split_whitespace();
        let Some(command) = tokens.next() else {
            return Ok(());
        };

        match command {
            "v" => {
                let [x, y, z] = self.floats::<3>(&mut tokens, ParseErrorKind::MalformedVertex)?;
                self.out.mesh.positions.push(Vertex3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = self.floats::<2>(&mut tokens, ParseErrorKind::MalformedTexCoord)?;
                self.out.mesh.texcoords.push(TexCoord2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = self.floats::<3>(&mut tokens, ParseErrorKind::MalformedNormal)?;
                self.out.mesh.normals.push(Vertex3::new(x, y, z));
            }
            "f" => {
                let face = self.face(tokens)?;
                self.out.mesh.faces.push(face);
            }
            c if c.starts_with('#') => {}
            other => {
                let warning = format!("Warning: unsupported command '{}' at line {}", other, self.line);
                tracing::warn!("{}", warning);
                self.out.warnings.push(warning);
            }
        }
        Ok(())
    }

    fn floats<'t, const N: usize>(
        &self,
        tokens: &mut impl Iterator<Item = &'t str>,
        kind: ParseErrorKind,
    ) -> Result<[f32; N], LoadError> {
        let mut values = [0.0; N];
        for value in &mut values {
            *value = tokens
                .next()
                .and_then(|t| t.parse::<f32>().ok())
                .ok_or_else(|| LoadError::parse(self.line, kind))?;
        }
        Ok(values)
    }

    fn face<'t>(&mut self, tokens: impl Iterator<Item = &'t str>) -> Result<Face, LoadError> {
        let mut corners: Vec<FaceIndex> = Vec::with_capacity(3);
        for token in tokens {
            let index = self
                .resolver
                .resolve(token)
                .ok_or_else(|| LoadError::parse(self.line, ParseErrorKind::MalformedFace))?;
            if !self.in_bounds(index) {
                return Err(LoadError::parse(self.line, ParseErrorKind::IndexOutOfBound));
            }
            corners.push(index);
        }

        <Face>::try_from(corners.as_slice())
            .map_err(|_| LoadError::parse(self.line, ParseErrorKind::NotTriangle))
    }

    fn in_bounds(&self, index: FaceIndex) -> bool {
        let mesh = &self.out.mesh;
        index.vertex as usize <= mesh.positions.len()
            && index.tex as usize <= mesh.texcoords.len()
            && index.normal as usize <= mesh.normals.len()
    }
}

/// Convenience wrapper for callers that don't track progress or cancellation.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<ParsedObj, LoadError> {
    let never = AtomicBool::new(false);
    let mut parser = ObjParser::new(&never, 0);
    parser.parse(reader, |_| {})?;
    Ok(parser.into_parsed())
}
