//! The conversion engine.

use marq_parser::BlockParser;
use marq_registry::Registry;

use crate::serialize::HtmlSerializer;
use crate::treeprocess::TreeContext;
use crate::{
    CodeSpanRule, ConvertError, EmphasisRule, Extension, InlineRule, InlineTreeprocessor,
    NormalizeWhitespace, Postprocessor, Preprocessor, Serializer, Treeprocessor,
};

/// Text-to-output conversion engine with pluggable pipeline stages.
///
/// Owns one ordered registry per stage plus the block parser (which owns
/// the block handler registry) and a serializer. Registries are mutated by
/// extensions during integration and read repeatedly during each
/// conversion; [`reset`](Engine::reset) restores the default pipeline.
///
/// One conversion runs at a time per engine instance; conversions are
/// synchronous and run to completion or fail fatally.
pub struct Engine {
    /// Source-line passes, run before block parsing.
    pub preprocessors: Registry<Box<dyn Preprocessor>>,
    /// Text-node rewrite rules, applied by the inline tree processor.
    pub inline_rules: Registry<Box<dyn InlineRule>>,
    /// In-place tree passes, run after block parsing.
    pub treeprocessors: Registry<Box<dyn Treeprocessor>>,
    /// Output-text passes, run after serialization.
    pub postprocessors: Registry<Box<dyn Postprocessor>>,
    /// The block parsing loop and its handler registry.
    pub parser: BlockParser,
    serializer: Box<dyn Serializer>,
}

impl Engine {
    /// Create an engine with the default pipeline installed.
    #[must_use]
    pub fn new() -> Self {
        let mut engine = Self {
            preprocessors: Registry::new(),
            inline_rules: Registry::new(),
            treeprocessors: Registry::new(),
            postprocessors: Registry::new(),
            parser: BlockParser::new(),
            serializer: Box::new(HtmlSerializer),
        };
        engine.install_defaults();
        engine
    }

    /// Register an extension (builder style).
    ///
    /// # Errors
    ///
    /// Any [`RegistryError`](marq_registry::RegistryError) the extension's
    /// `extend` returned.
    pub fn with_extension(mut self, extension: &dyn Extension) -> Result<Self, ConvertError> {
        self.register_extension(extension)?;
        Ok(self)
    }

    /// Register an extension, handing it the pipeline registries.
    ///
    /// # Errors
    ///
    /// Any [`RegistryError`](marq_registry::RegistryError) the extension's
    /// `extend` returned.
    pub fn register_extension(&mut self, extension: &dyn Extension) -> Result<(), ConvertError> {
        extension.extend(self)?;
        Ok(())
    }

    /// Replace the serializer (builder style).
    #[must_use]
    pub fn with_serializer(mut self, serializer: impl Serializer + 'static) -> Self {
        self.serializer = Box::new(serializer);
        self
    }

    /// Convert source text to output text, running the full pipeline.
    ///
    /// Stages run in order: preprocessors over the source lines, the block
    /// parsing loop, tree processors over the resulting tree, the
    /// serializer, postprocessors over the output text.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Parse`] if block parsing fails. A failed conversion
    /// yields no output.
    pub fn convert(&self, source: &str) -> Result<String, ConvertError> {
        let mut lines: Vec<String> = source.lines().map(str::to_owned).collect();
        for (id, preprocessor) in self.preprocessors.iter() {
            tracing::debug!(preprocessor = %id, "running preprocessor");
            lines = preprocessor.run(lines);
        }

        let mut root = self.parser.parse_document(&lines.join("\n"))?;

        let cx = TreeContext {
            inline_rules: &self.inline_rules,
        };
        for (id, treeprocessor) in self.treeprocessors.iter() {
            tracing::debug!(treeprocessor = %id, "running tree processor");
            treeprocessor.run(&mut root, &cx);
        }

        let mut output = self.serializer.serialize(&root);
        for (id, postprocessor) in self.postprocessors.iter() {
            tracing::debug!(postprocessor = %id, "running postprocessor");
            output = postprocessor.run(output);
        }
        Ok(output)
    }

    /// Restore every registry to the default pipeline, discarding extension
    /// registrations. Extensions still wanted must be re-registered.
    pub fn reset(&mut self) {
        self.preprocessors.clear();
        self.inline_rules.clear();
        self.treeprocessors.clear();
        self.postprocessors.clear();
        self.install_defaults();
    }

    fn install_defaults(&mut self) {
        self.preprocessors
            .set("normalize-whitespace", Box::new(NormalizeWhitespace) as Box<dyn Preprocessor>);
        self.inline_rules
            .set("code-span", Box::new(CodeSpanRule) as Box<dyn InlineRule>);
        self.inline_rules.set("emphasis", Box::new(EmphasisRule));
        self.treeprocessors
            .set("inline", Box::new(InlineTreeprocessor) as Box<dyn Treeprocessor>);
        self.parser = BlockParser::with_default_handlers();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use marq_registry::{Position, RegistryError};
    use marq_tree::Element;

    use super::*;

    #[test]
    fn test_convert_basic_document() {
        let engine = Engine::new();
        let html = engine
            .convert("# Title\n\nSome **bold** text.")
            .unwrap();
        assert_eq!(
            html,
            "<h1>Title</h1>\n<p>Some <strong>bold</strong> text.</p>\n"
        );
    }

    #[test]
    fn test_convert_blockquote() {
        let engine = Engine::new();
        let html = engine.convert("> quoted *words*").unwrap();
        assert_eq!(html, "<blockquote><p>quoted <em>words</em></p></blockquote>\n");
    }

    #[test]
    fn test_convert_escapes_source_text() {
        let engine = Engine::new();
        let html = engine.convert("a < b & c").unwrap();
        assert_eq!(html, "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn test_convert_failure_yields_no_output() {
        let mut engine = Engine::new();
        // Strip the mandatory fallback: parsing anything must now fail.
        engine.parser.handlers_mut().remove("paragraph").unwrap();
        engine.parser.handlers_mut().remove("hash-heading").unwrap();
        engine.parser.handlers_mut().remove("blockquote").unwrap();

        assert!(engine.convert("some text").is_err());
    }

    struct ShoutExtension;

    impl Extension for ShoutExtension {
        fn extend(&self, engine: &mut Engine) -> Result<(), RegistryError> {
            struct Shout;
            impl Postprocessor for Shout {
                fn run(&self, output: String) -> String {
                    output.to_uppercase()
                }
            }
            engine
                .postprocessors
                .insert("shout", Box::new(Shout), Position::End)
        }
    }

    #[test]
    fn test_extension_adds_postprocessor() {
        let engine = Engine::new().with_extension(&ShoutExtension).unwrap();
        let html = engine.convert("hello").unwrap();
        assert_eq!(html, "<P>HELLO</P>\n");
    }

    struct FenceExtension;

    impl Extension for FenceExtension {
        fn extend(&self, engine: &mut Engine) -> Result<(), RegistryError> {
            use marq_parser::{
                BlockHandler, BlockParser, Blocks, ParseContext, ParseError,
            };

            struct FenceHandler;
            impl BlockHandler for FenceHandler {
                fn matches(&self, _cx: &ParseContext, _parent: &Element, block: &str) -> bool {
                    block.starts_with("```")
                }

                fn apply(
                    &self,
                    _parser: &BlockParser,
                    _cx: &mut ParseContext,
                    parent: &mut Element,
                    blocks: &mut Blocks,
                ) -> Result<(), ParseError> {
                    let Some(block) = blocks.pop_front() else {
                        return Ok(());
                    };
                    let body: Vec<_> = block
                        .lines()
                        .filter(|line| !line.starts_with("```"))
                        .collect();
                    let pre = parent.append(Element::new("pre"));
                    pre.append(Element::new("code").with_text(body.join("\n")));
                    Ok(())
                }
            }

            // Interject ahead of the blockquote handler by name
            engine.parser.handlers_mut().insert(
                "fence",
                Box::new(FenceHandler),
                Position::before("blockquote"),
            )
        }
    }

    #[test]
    fn test_extension_interjects_block_handler() {
        let engine = Engine::new().with_extension(&FenceExtension).unwrap();

        let keys: Vec<_> = engine
            .parser
            .handlers()
            .keys()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(keys, ["hash-heading", "fence", "blockquote", "paragraph"]);

        let html = engine.convert("```\nlet x = 1;\n```").unwrap();
        assert_eq!(html, "<pre><code>let x = 1;</code></pre>\n");
    }

    #[test]
    fn test_extension_bad_anchor_surfaces() {
        struct BadExtension;
        impl Extension for BadExtension {
            fn extend(&self, engine: &mut Engine) -> Result<(), RegistryError> {
                struct Nop;
                impl Postprocessor for Nop {
                    fn run(&self, output: String) -> String {
                        output
                    }
                }
                engine
                    .postprocessors
                    .insert("nop", Box::new(Nop), Position::after("no-such-stage"))
            }
        }

        let result = Engine::new().with_extension(&BadExtension);
        assert!(matches!(
            result,
            Err(ConvertError::Registry(RegistryError::MissingAnchor(_)))
        ));
    }

    #[test]
    fn test_reset_restores_default_pipeline() {
        let mut engine = Engine::new().with_extension(&ShoutExtension).unwrap();
        engine.inline_rules.remove("emphasis").unwrap();

        let html = engine.convert("**x**").unwrap();
        assert_eq!(html, "<P>**X**</P>\n");

        engine.reset();

        let html = engine.convert("**x**").unwrap();
        assert_eq!(html, "<p><strong>x</strong></p>\n");
        assert!(!engine.postprocessors.contains("shout"));
    }

    #[test]
    fn test_custom_serializer() {
        struct TagCounter;
        impl Serializer for TagCounter {
            fn serialize(&self, root: &Element) -> String {
                format!("{} top-level elements", root.children.len())
            }
        }

        let engine = Engine::new().with_serializer(TagCounter);
        let out = engine.convert("one\n\ntwo").unwrap();
        assert_eq!(out, "2 top-level elements");
    }

    #[test]
    fn test_preprocessor_runs_before_parsing() {
        let mut engine = Engine::new();

        struct StripComments;
        impl Preprocessor for StripComments {
            fn run(&self, lines: Vec<String>) -> Vec<String> {
                lines
                    .into_iter()
                    .filter(|line| !line.starts_with("//"))
                    .collect()
            }
        }

        engine
            .preprocessors
            .insert(
                "strip-comments",
                Box::new(StripComments),
                Position::after("normalize-whitespace"),
            )
            .unwrap();

        let html = engine.convert("// hidden\nvisible").unwrap();
        assert_eq!(html, "<p>visible</p>\n");
    }
}
