// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use regex::Regex;
use rpc_lemma_gen::ir::{Direction, Method, Parameter};
use rpc_lemma_gen::{
    generate_theory, run_generation, Architecture, GenError, Interface, Options, RenderMode,
};
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures() -> Vec<PathBuf> {
    let fixtures = glob::glob("tests/inputs/*.toml")
        .expect("Invalid glob pattern")
        .map(|entry| entry.expect("Failed to read file path"))
        .collect::<Vec<_>>();
    assert!(!fixtures.is_empty(), "no fixtures under tests/inputs");
    fixtures
}

fn load(path: &Path) -> Interface {
    Interface::from_toml_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Names of all lemmas in document order.
fn lemma_names(document: &str) -> Vec<String> {
    let re = Regex::new(r"(?m)^lemma ([^\[:]+)").unwrap();
    re.captures_iter(document)
        .map(|c| c[1].to_string())
        .collect()
}

#[test]
fn every_fixture_renders_a_complete_theory() {
    for path in fixtures() {
        let interface = load(&path);
        for arch in Architecture::ALL {
            for mode in [
                RenderMode::Immediate,
                RenderMode::Accumulate,
                RenderMode::Condensed,
            ] {
                let mut options = Options::default();
                options.architecture = arch;
                options.render.mode = mode;
                let document = generate_theory(&interface, "Glue", &options)
                    .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
                assert!(document.contains("theory Glue imports"));
                assert!(document.trim_end().ends_with("end\n\nend"));
                for method in &interface.methods {
                    let name = format!("lemma {}_{}_wp[wp_unsafe]:", interface.name, method.name);
                    assert!(document.contains(&name), "{}: missing {name}", path.display());
                }
            }
        }
    }
}

#[test]
fn generation_is_deterministic() {
    for path in fixtures() {
        let interface = load(&path);
        let options = Options::default();
        let first = generate_theory(&interface, "Glue", &options).unwrap();
        let second = generate_theory(&load(&path), "Glue", &options).unwrap();
        assert_eq!(first, second, "{}", path.display());
    }
}

#[test]
fn helper_lemmas_precede_rpc_lemmas() {
    let interface = load(Path::new("tests/inputs/echo.toml"));
    let document = generate_theory(&interface, "Glue", &Options::default()).unwrap();
    insta::assert_snapshot!(
        lemma_names(&document).join(", "),
        @"tls_ptr_aligned, thread_index_wp, get_echo_int_ys_wp, set_echo_int_ys_wp, Echo_echo_int_wp, Echo_reset_wp"
    );
}

#[test]
fn region_validity_covers_every_thread() {
    // Two provided endpoints, one dataport and the control thread.
    let interface = load(Path::new("tests/inputs/storage.toml"));
    let document = generate_theory(&interface, "Glue", &Options::default()).unwrap();
    for n in 1..=4 {
        assert!(document.contains(&format!("(symbol_table ''read_block_data_{n}'')")));
        assert!(document.contains(&format!("(symbol_table ''write_block_data_{n}'')")));
    }
    assert!(!document.contains("read_block_data_5"));
    assert!(document.contains("thread_index s \\<in> {1..4}"));
    // Only parameters written by the callee are asserted on in RPC lemmas.
    assert!(!document.contains("is_valid_w64 s block"));
}

#[test]
fn interface_without_arrays_has_no_helpers() {
    let interface = load(Path::new("tests/inputs/timer.toml"));
    let document = generate_theory(&interface, "Glue", &Options::default()).unwrap();
    insta::assert_snapshot!(
        lemma_names(&document).join(", "),
        @"tls_ptr_aligned, thread_index_wp, Timer_now_wp, Timer_sleep_wp"
    );
    assert!(document.contains("\\<lbrace>\\<lambda>r s. ipc_buffer_valid s\\<rbrace>!\""));
    assert!(document.contains("\\<lbrace>\\<lambda>_ s. ipc_buffer_valid s\\<rbrace>!\""));
}

#[test]
fn run_generation_writes_the_theory() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("nested").join("Echo_glue.thy");
    let interface = load(Path::new("tests/inputs/echo.toml"));
    let mut options = Options::default();
    options.output_path = output.to_string_lossy().to_string();

    let written = run_generation(&options, &interface).unwrap();
    assert_eq!(written, output);
    let expected = generate_theory(&interface, "Echo_glue", &options).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[test]
fn aborted_run_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Broken.thy");
    let mut interface = load(Path::new("tests/inputs/timer.toml"));
    interface.methods.push(Method {
        name: "drift".to_string(),
        return_type: None,
        parameters: vec![Parameter::new("d", "long double", Direction::Out, false)],
    });
    let mut options = Options::default();
    options.output_path = output.to_string_lossy().to_string();

    let err = run_generation(&options, &interface).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GenError>(),
        Some(GenError::Size { bytes: 16, .. })
    ));
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn reserved_parameter_name_is_rejected() {
    let mut interface = load(Path::new("tests/inputs/timer.toml"));
    interface.methods[1].parameters[0].name = "register".to_string();
    let err = generate_theory(&interface, "Glue", &Options::default()).unwrap_err();
    assert!(matches!(err, GenError::ReservedIdentifier { ref name, .. } if name == "register"));
}

#[test]
fn ambiguous_symbols_are_rejected() {
    // `a_b`.`c` and `a`.`b_c` both name the symbol `a_b_c_1`.
    let interface = Interface::from_toml_str(
        r#"
name = "Clash"
origins = ["client"]

[[methods]]
name = "a_b"
[[methods.parameters]]
name = "c"
type = "int"
array = true

[[methods]]
name = "a"
[[methods.parameters]]
name = "b_c"
type = "int"
array = true
"#,
    )
    .unwrap();
    let err = generate_theory(&interface, "Glue", &Options::default()).unwrap_err();
    assert!(matches!(err, GenError::SymbolCollision { ref symbol, .. } if symbol == "a_b_c_1"));
}

#[test]
fn clashing_lemma_names_are_rejected() {
    // The RPC lemma of `get.echo_xs` and the get helper of `echo.xs` are
    // both named `get_echo_xs_wp`.
    let interface = Interface::from_toml_str(
        r#"
name = "get"
origins = ["client"]

[[methods]]
name = "echo_xs"

[[methods]]
name = "echo"
[[methods.parameters]]
name = "xs"
type = "int"
array = true
"#,
    )
    .unwrap();
    let err = generate_theory(&interface, "Glue", &Options::default()).unwrap_err();
    assert!(
        matches!(err, GenError::SymbolCollision { ref symbol, .. } if symbol == "get_echo_xs_wp")
    );
}

#[test]
fn parameters_named_like_binders_are_rejected() {
    let interface = Interface::from_toml_str(
        r#"
name = "Echo"
origins = ["client"]

[[methods]]
name = "swap"
return_type = "int"
[[methods.parameters]]
name = "s"
type = "int"
direction = "out"
[[methods.parameters]]
name = "r"
type = "int"
direction = "out"
"#,
    )
    .unwrap();
    let err = generate_theory(&interface, "Glue", &Options::default()).unwrap_err();
    assert!(matches!(err, GenError::CapturedName { ref name, .. } if name == "s"));

    let mut interface = interface;
    interface.methods[0].parameters.remove(0);
    let err = generate_theory(&interface, "Glue", &Options::default()).unwrap_err();
    assert!(matches!(err, GenError::CapturedName { ref name, .. } if name == "r"));
}
