// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Lemma emission.
//!
//! Builds one [`LemmaBlock`] per RPC method and two per array parameter
//! (reading and writing the parameter's per-thread region), then renders
//! them into the document buffer.

use crate::arch::Architecture;
use crate::assertion::{AssertionBuilder, Clause, Fragment};
use crate::error::{GenError, Result};
use crate::fold::render_conjunction;
use crate::ir::{Interface, Method, Parameter};
use crate::layout::{indent_lock, layout};
use crate::naming::{DeclarationTable, SymbolKey, SymbolTable};
use crate::options::RenderOptions;
use crate::prelude;
use crate::theory_writer::TheoryWriter;
use crate::threads::thread_count;
use crate::type_width::{resolve, WordWidth};
use log::{debug, info};

const PRE_PREFIX: &str = "\"\\<lbrace>\\<lambda>s. ";
const OPERATION_PREFIX: &str = "   ";
const PRE_SUFFIX: &str = "\\<rbrace>";
const POST_SUFFIX: &str = "\\<rbrace>!\"";

/// One lemma: a Hoare triple over an AutoCorres-lifted glue function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaBlock {
    pub name: String,
    pub pre: Vec<Clause>,
    pub operation: String,
    /// Binder for the return value in the postcondition.
    pub result_binder: String,
    pub post: Vec<Clause>,
    pub proof: Vec<String>,
}

impl LemmaBlock {
    fn post_prefix(&self) -> String {
        format!(" \\<lbrace>\\<lambda>{} s. ", self.result_binder)
    }
}

pub struct LemmaEmitter<'a> {
    interface: &'a Interface,
    arch: Architecture,
    render: &'a RenderOptions,
    builder: AssertionBuilder,
    symbols: SymbolTable,
    thread_count: usize,
    writer: TheoryWriter,
}

impl<'a> LemmaEmitter<'a> {
    pub fn new(
        interface: &'a Interface,
        arch: Architecture,
        render: &'a RenderOptions,
    ) -> Result<Self> {
        if interface.origins.len() != 1 {
            return Err(GenError::Shape {
                interface: interface.name.clone(),
                origins: interface.origins.len(),
            });
        }
        let thread_count = thread_count(interface);
        let symbols = SymbolTable::for_interface(interface, thread_count)?;
        let declarations = DeclarationTable::for_interface(interface)?;
        debug!(
            "{} threads, {} per-thread symbols, {} declarations for `{}`",
            thread_count,
            symbols.len(),
            declarations.len(),
            interface.name
        );
        Ok(Self {
            interface,
            arch,
            render,
            builder: AssertionBuilder::new(render.msg_max_length),
            symbols,
            thread_count,
            writer: TheoryWriter::new(),
        })
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Renders the complete document. Nothing is returned unless every
    /// lemma rendered.
    pub fn render_document(mut self, theory_name: &str) -> Result<String> {
        self.check_widths()?;
        let context = prelude::context(
            theory_name,
            self.interface,
            self.arch,
            self.render,
            self.thread_count,
        );
        self.writer.write(&prelude::render_header(&context)?);
        self.writer.write(&prelude::render_support(&context)?);

        let interface = self.interface;
        for method in &interface.methods {
            for param in method.array_parameters() {
                for block in self.helper_lemmas(method, param)? {
                    self.emit(&block);
                }
            }
        }
        for method in &interface.methods {
            info!("emitting RPC lemma for {}.{}", interface.name, method.name);
            let block = self.rpc_lemma(method)?;
            self.emit(&block);
        }

        self.writer.write(&prelude::render_footer(&context)?);
        Ok(self.writer.into_inner())
    }

    /// Resolves every parameter and return type before anything is built.
    fn check_widths(&self) -> Result<()> {
        for method in &self.interface.methods {
            if let Some(ret) = &method.return_type {
                resolve(self.arch, ret)?;
            }
            for param in &method.parameters {
                resolve(self.arch, &param.type_tag)?;
            }
        }
        Ok(())
    }

    fn region_fragments(
        &mut self,
        method: &Method,
        param: &Parameter,
        width: WordWidth,
    ) -> Result<Vec<Fragment>> {
        (0..self.thread_count)
            .map(|thread_index| {
                let symbol = self
                    .symbols
                    .register(SymbolKey::new(&method.name, &param.name, thread_index))?;
                Ok(self.builder.thread_region_valid(&symbol, width))
            })
            .collect()
    }

    /// Get and set lemmas for the per-thread region of an array parameter.
    pub fn helper_lemmas(&mut self, method: &Method, param: &Parameter) -> Result<Vec<LemmaBlock>> {
        let width = resolve(self.arch, &param.type_tag)?;
        let regions = self.region_fragments(method, param, width)?;
        let bound = self.builder.thread_index_bound(self.thread_count);
        let stem = format!("{}_{}", method.name, param.name);

        let get = LemmaBlock {
            name: format!("get_{stem}_wp"),
            pre: vec![
                Clause::Single(Fragment::new("P s")),
                Clause::Single(bound.clone()),
                Clause::Group(regions.clone()),
            ],
            operation: format!("get_{stem}'"),
            result_binder: format!("(r::{} ptr)", width.word_type()),
            post: vec![
                Clause::Single(Fragment::new("P s")),
                Clause::Single(Fragment::new(format!("{} s r", width.valid_fn()))),
            ],
            proof: thread_local_proof(&format!("get_{stem}'")),
        };
        let set = LemmaBlock {
            name: format!("set_{stem}_wp"),
            pre: vec![Clause::Single(bound), Clause::Group(regions.clone())],
            operation: format!("set_{stem}' v"),
            result_binder: "_".to_string(),
            post: vec![Clause::Group(regions)],
            proof: thread_local_proof(&format!("set_{stem}'")),
        };
        Ok(vec![get, set])
    }

    pub fn rpc_lemma(&self, method: &Method) -> Result<LemmaBlock> {
        let mut pre = vec![Clause::Single(self.builder.ipc_buffer_valid())];
        for param in &method.parameters {
            let width = resolve(self.arch, &param.type_tag)?;
            pre.extend(self.builder.build(method, param, width));
        }

        let function = format!("{}_{}'", self.interface.name, method.name);
        let operation = std::iter::once(function.as_str())
            .chain(method.parameters.iter().map(|p| p.name.as_str()))
            .collect::<Vec<_>>()
            .join(" ");
        let result_binder = if method.return_type.is_some() { "r" } else { "_" };

        Ok(LemmaBlock {
            name: format!("{}_{}_wp", self.interface.name, method.name),
            post: pre.clone(),
            pre,
            operation,
            result_binder: result_binder.to_string(),
            proof: vec![
                format!("apply (simp add: {function}_def)"),
                "apply (wp seL4_Call_wp)".to_string(),
                "apply (clarsimp simp: seL4_Call_def)".to_string(),
            ],
        })
    }

    /// Renders `block` into the document buffer.
    pub fn emit(&mut self, block: &LemmaBlock) {
        let mode = self.render.mode;
        let w = &mut self.writer;
        w.line(&format!("lemma {}[wp_unsafe]:", block.name));
        w.indent();
        let width = self.render.wrap_width.saturating_sub(w.indent_width());

        let pre = layout(
            &render_conjunction(&block.pre, mode),
            indent_lock(PRE_PREFIX),
            mode.is_condensed(),
            width,
            PRE_SUFFIX.chars().count(),
        );
        w.write(PRE_PREFIX);
        w.write(&pre);
        w.line(PRE_SUFFIX);

        w.write(OPERATION_PREFIX);
        w.line(&block.operation);

        let post_prefix = block.post_prefix();
        let post = layout(
            &render_conjunction(&block.post, mode),
            indent_lock(&post_prefix),
            mode.is_condensed(),
            width,
            POST_SUFFIX.chars().count(),
        );
        w.write(&post_prefix);
        w.write(&post);
        w.line(POST_SUFFIX);

        for step in &block.proof {
            w.line(step);
        }
        w.line("done");
        w.dedent();
        w.newline();
    }
}

fn thread_local_proof(function: &str) -> Vec<String> {
    vec![
        format!("apply (simp add: {function}_def)"),
        "apply (wp thread_index_wp)".to_string(),
        "apply (clarsimp simp: thread_count_def)".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::RenderMode;
    use crate::ir::{ComponentShape, Direction};

    fn interface(methods: Vec<Method>, component: ComponentShape) -> Interface {
        Interface {
            name: "Echo".to_string(),
            origins: vec!["client".to_string()],
            component,
            methods,
        }
    }

    fn render(mode: RenderMode) -> RenderOptions {
        RenderOptions {
            mode,
            msg_max_length: 2,
            ..Default::default()
        }
    }

    fn block_text(emitter: &mut LemmaEmitter, block: &LemmaBlock) -> String {
        emitter.emit(block);
        std::mem::take(&mut emitter.writer).into_inner()
    }

    #[test]
    fn rejects_interfaces_without_a_single_origin() {
        let mut iface = interface(vec![], ComponentShape::default());
        let opts = render(RenderMode::Accumulate);
        iface.origins.clear();
        assert!(matches!(
            LemmaEmitter::new(&iface, Architecture::X86_64, &opts),
            Err(GenError::Shape { origins: 0, .. })
        ));
        iface.origins = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(
            LemmaEmitter::new(&iface, Architecture::X86_64, &opts),
            Err(GenError::Shape { origins: 2, .. })
        ));
    }

    #[test]
    fn in_only_method_has_matching_conditions() {
        let method = Method {
            name: "ping".to_string(),
            return_type: None,
            parameters: vec![Parameter::new("x", "int", Direction::In, false)],
        };
        let iface = interface(vec![method.clone()], ComponentShape::default());
        let opts = render(RenderMode::Accumulate);
        let mut emitter = LemmaEmitter::new(&iface, Architecture::X86_64, &opts).unwrap();
        let block = emitter.rpc_lemma(&method).unwrap();
        assert_eq!(block.pre, block.post);
        assert_eq!(
            block.pre,
            vec![Clause::Single(Fragment::new("ipc_buffer_valid s"))]
        );

        let text = block_text(&mut emitter, &block);
        assert_eq!(
            text,
            "lemma Echo_ping_wp[wp_unsafe]:\n\
             \x20 \"\\<lbrace>\\<lambda>s. ipc_buffer_valid s\\<rbrace>\n\
             \x20    Echo_ping' x\n\
             \x20  \\<lbrace>\\<lambda>_ s. ipc_buffer_valid s\\<rbrace>!\"\n\
             \x20 apply (simp add: Echo_ping'_def)\n\
             \x20 apply (wp seL4_Call_wp)\n\
             \x20 apply (clarsimp simp: seL4_Call_def)\n\
             \x20 done\n\n"
        );
    }

    #[test]
    fn continuation_lines_align_under_binders() {
        let method = Method {
            name: "put".to_string(),
            return_type: Some("int".to_string()),
            parameters: vec![Parameter::new("y", "uint32_t", Direction::Out, false)],
        };
        let iface = interface(vec![method.clone()], ComponentShape::default());
        let opts = render(RenderMode::Accumulate);
        let mut emitter = LemmaEmitter::new(&iface, Architecture::X86_64, &opts).unwrap();
        let block = emitter.rpc_lemma(&method).unwrap();
        let text = block_text(&mut emitter, &block);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "  \"\\<lbrace>\\<lambda>s. ipc_buffer_valid s \\<and>");
        // 2 (writer) + 22 (binder prefix)
        assert_eq!(lines[2], format!("{}is_valid_w32 s y\\<rbrace>", " ".repeat(24)));
        assert_eq!(lines[3], "     Echo_put' y");
        assert_eq!(lines[4], "   \\<lbrace>\\<lambda>r s. ipc_buffer_valid s \\<and>");
        assert_eq!(lines[5], format!("{}is_valid_w32 s y\\<rbrace>!\"", " ".repeat(26)));
    }

    #[test]
    fn helper_lemma_covers_every_thread() {
        let method = Method {
            name: "echo".to_string(),
            return_type: None,
            parameters: vec![Parameter::new("xs", "int", Direction::In, true)],
        };
        // 1 + provides 1 + uses 1 = 3 threads
        let shape = ComponentShape {
            provides: 1,
            uses: 1,
            ..Default::default()
        };
        let iface = interface(vec![method.clone()], shape);
        let opts = render(RenderMode::Accumulate);
        let mut emitter = LemmaEmitter::new(&iface, Architecture::Ia32, &opts).unwrap();
        assert_eq!(emitter.thread_count(), 3);

        let blocks = emitter.helper_lemmas(&method, &method.parameters[0]).unwrap();
        assert_eq!(blocks.len(), 2);
        let get = &blocks[0];
        assert_eq!(get.name, "get_echo_xs_wp");
        assert_eq!(get.result_binder, "(r::32 signed word ptr)");

        let text = block_text(&mut emitter, get);
        assert_eq!(text.matches("symbol_table ''").count(), 3);
        for thread in 1..=3 {
            assert!(text.contains(&format!(
                "is_valid_sw32 s (Ptr (symbol_table ''echo_xs_{thread}''))"
            )));
        }
        assert!(text.contains("thread_index s \\<in> {1..3}"));
        assert!(text.contains("is_valid_sw32 s r\\<rbrace>!\""));
    }

    #[test]
    fn immediate_mode_does_not_fold() {
        let method = Method {
            name: "fill".to_string(),
            return_type: None,
            parameters: vec![Parameter::new("buf", "char", Direction::Out, true)],
        };
        let iface = interface(vec![method.clone()], ComponentShape::default());
        let opts = render(RenderMode::Immediate);
        let mut emitter = LemmaEmitter::new(&iface, Architecture::X86_64, &opts).unwrap();
        let block = emitter.rpc_lemma(&method).unwrap();
        let text = block_text(&mut emitter, &block);
        assert!(!text.contains("(is_valid_w8"));
        assert!(text.contains("is_valid_w8 s (buf +\\<^sub>p 1)\\<rbrace>"));
    }

    #[test]
    fn condensed_lines_stay_within_wrap_width() {
        let method = Method {
            name: "fill".to_string(),
            return_type: None,
            parameters: vec![Parameter::new("buf", "char", Direction::Out, true)],
        };
        let iface = interface(vec![method.clone()], ComponentShape::default());
        for wrap_width in 70..=140 {
            let opts = RenderOptions {
                wrap_width,
                ..render(RenderMode::Condensed)
            };
            let mut emitter = LemmaEmitter::new(&iface, Architecture::X86_64, &opts).unwrap();
            let block = emitter.rpc_lemma(&method).unwrap();
            let text = block_text(&mut emitter, &block);
            for line in text.lines() {
                assert!(
                    line.chars().count() <= wrap_width,
                    "{line:?} is wider than {wrap_width}"
                );
            }
        }
    }

    #[test]
    fn size_error_aborts_document() {
        let method = Method {
            name: "precise".to_string(),
            return_type: Some("long double".to_string()),
            parameters: vec![],
        };
        let iface = interface(vec![method], ComponentShape::default());
        let opts = render(RenderMode::Condensed);
        let emitter = LemmaEmitter::new(&iface, Architecture::X86_64, &opts).unwrap();
        assert!(matches!(
            emitter.render_document("Echo_glue"),
            Err(GenError::Size { .. })
        ));
    }

    #[test]
    fn lemma_name_collision_aborts_before_rendering() {
        let methods = vec![
            Method {
                name: "echo_xs".to_string(),
                return_type: None,
                parameters: vec![],
            },
            Method {
                name: "echo".to_string(),
                return_type: None,
                parameters: vec![Parameter::new("xs", "int", Direction::In, true)],
            },
        ];
        let mut iface = interface(methods, ComponentShape::default());
        iface.name = "get".to_string();
        let opts = render(RenderMode::Condensed);
        assert!(matches!(
            LemmaEmitter::new(&iface, Architecture::X86_64, &opts),
            Err(GenError::SymbolCollision { ref symbol, .. }) if symbol == "get_echo_xs_wp"
        ));
    }

    #[test]
    fn symbol_collision_aborts_before_rendering() {
        let methods = vec![
            Method {
                name: "a_b".to_string(),
                return_type: None,
                parameters: vec![Parameter::new("c", "int", Direction::In, true)],
            },
            Method {
                name: "a".to_string(),
                return_type: None,
                parameters: vec![Parameter::new("b_c", "int", Direction::In, true)],
            },
        ];
        let iface = interface(methods, ComponentShape::default());
        let opts = render(RenderMode::Condensed);
        assert!(matches!(
            LemmaEmitter::new(&iface, Architecture::X86_64, &opts),
            Err(GenError::SymbolCollision { .. })
        ));
    }
}
