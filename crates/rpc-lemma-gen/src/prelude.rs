// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Fixed theory text surrounding the generated lemmas.

use crate::arch::Architecture;
use crate::error::Result;
use crate::ir::Interface;
use crate::options::RenderOptions;
use tera::{Context, Tera};

const HEADER: &str = include_str!("../templates/header.thy");
const SUPPORT: &str = include_str!("../templates/support.thy");
const FOOTER: &str = include_str!("../templates/footer.thy");

pub fn context(
    theory_name: &str,
    interface: &Interface,
    arch: Architecture,
    render: &RenderOptions,
    thread_count: usize,
) -> Context {
    let mut context = Context::new();
    context.insert("theory_name", theory_name);
    context.insert("interface", &interface.name);
    context.insert("origin", &interface.origins.join(", "));
    context.insert("arch", arch.name());
    context.insert("thread_count", &thread_count);
    context.insert("msg_max_length", &render.msg_max_length);
    context.insert("tls_region_mask", &format!("0x{:x}", render.tls_region_mask));
    context
}

pub fn render_header(context: &Context) -> Result<String> {
    Ok(Tera::one_off(HEADER, context, false)?)
}

/// Definitions and lemmas shared by every generated lemma.
pub fn render_support(context: &Context) -> Result<String> {
    Ok(Tera::one_off(SUPPORT, context, false)?)
}

pub fn render_footer(context: &Context) -> Result<String> {
    Ok(Tera::one_off(FOOTER, context, false)?)
}
