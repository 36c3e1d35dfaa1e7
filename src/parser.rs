//! JS/TSX source parsing.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedModule {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Parse JS/JSX/TS/TSX source code into an AST.
///
/// Accepts a shared SourceMap so callers can parse many files in parallel and
/// still resolve spans afterwards.
pub fn parse_source(code: String, file_path: &str, source_map: Arc<SourceMap>) -> Result<ParsedModule> {
    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedModule { module, source_map })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tsx() {
        let source_map = Arc::new(SourceMap::default());
        let parsed = parse_source(
            "const x = <div>hello</div>;".to_string(),
            "test.tsx",
            source_map,
        );
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_reports_syntax_errors() {
        let source_map = Arc::new(SourceMap::default());
        let parsed = parse_source("const x = ;".to_string(), "test.ts", source_map);
        assert!(parsed.is_err());
    }
}
