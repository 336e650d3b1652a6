// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Reserved words of the C family front end the glue code is compiled with.
//!
//! Bump [`KEYWORD_TABLE_VERSION`] whenever an entry changes so generated
//! keyword lists can be traced back to the table they came from.

use crate::keywords::{Keyword, KeywordFlags};

pub const KEYWORD_TABLE_VERSION: &str = "c11-gnu-3";

macro_rules! keywords {
    ($($spelling:literal => $($flag:ident)|+),* $(,)?) => {
        &[$(Keyword {
            spelling: $spelling,
            categories: KeywordFlags::from_bits_retain(0 $(| KeywordFlags::$flag.bits())+),
        }),*]
    };
}

pub static KEYWORD_TABLE: &[Keyword] = keywords![
    // C89
    "auto" => ALL,
    "break" => ALL,
    "case" => ALL,
    "char" => ALL,
    "const" => ALL,
    "continue" => ALL,
    "default" => ALL,
    "do" => ALL,
    "double" => ALL,
    "else" => ALL,
    "enum" => ALL,
    "extern" => ALL,
    "float" => ALL,
    "for" => ALL,
    "goto" => ALL,
    "if" => ALL,
    "int" => ALL,
    "long" => ALL,
    "register" => ALL,
    "return" => ALL,
    "short" => ALL,
    "signed" => ALL,
    "sizeof" => ALL,
    "static" => ALL,
    "struct" => ALL,
    "switch" => ALL,
    "typedef" => ALL,
    "union" => ALL,
    "unsigned" => ALL,
    "void" => ALL,
    "volatile" => ALL,
    "while" => ALL,
    // C99 and C11
    "inline" => C99 | CXX | GNU,
    "restrict" => C99,
    "_Alignas" => ALL,
    "_Alignof" => ALL,
    "_Atomic" => ALL | NOOPENCL,
    "_Bool" => NOCXX,
    "_Complex" => ALL,
    "_Generic" => ALL,
    "_Imaginary" => ALL,
    "_Noreturn" => ALL,
    "_Static_assert" => ALL,
    "_Thread_local" => ALL,
    "__func__" => ALL,
    "__objc_yes" => ALL,
    "__objc_no" => ALL,
    // C++
    "asm" => CXX | GNU,
    "bool" => BOOL | CXX,
    "catch" => CXX,
    "class" => CXX,
    "const_cast" => CXX,
    "delete" => CXX,
    "dynamic_cast" => CXX,
    "explicit" => CXX,
    "export" => CXX,
    "false" => BOOL | CXX,
    "friend" => CXX,
    "mutable" => CXX,
    "namespace" => CXX,
    "new" => CXX,
    "operator" => CXX,
    "private" => CXX,
    "protected" => CXX,
    "public" => CXX,
    "reinterpret_cast" => CXX,
    "static_cast" => CXX,
    "template" => CXX,
    "this" => CXX,
    "throw" => CXX,
    "true" => BOOL | CXX,
    "try" => CXX,
    "typename" => CXX,
    "typeid" => CXX,
    "using" => CXX,
    "virtual" => CXX,
    "wchar_t" => WCHAR | CXX,
    // C++11
    "alignas" => CXX11,
    "alignof" => CXX11,
    "char16_t" => CXX11,
    "char32_t" => CXX11,
    "constexpr" => CXX11,
    "decltype" => CXX11,
    "noexcept" => CXX11,
    "nullptr" => CXX11,
    "static_assert" => CXX11,
    "thread_local" => CXX11,
    // GNU extensions
    "_Decimal32" => ALL,
    "_Decimal64" => ALL,
    "_Decimal128" => ALL,
    "__null" => CXX,
    "__alignof" => ALL,
    "__attribute" => ALL,
    "__builtin_choose_expr" => ALL,
    "__builtin_offsetof" => ALL,
    "__builtin_types_compatible_p" => ALL,
    "__builtin_va_arg" => ALL,
    "__extension__" => ALL,
    "__imag" => ALL,
    "__int128" => INT128,
    "__label__" => ALL,
    "__real" => ALL,
    "__thread" => ALL,
    "__FUNCTION__" => ALL,
    "__PRETTY_FUNCTION__" => ALL,
    "typeof" => GNU,
    // Microsoft extensions
    "__int8" => MS,
    "__int16" => MS,
    "__int32" => MS,
    "__int64" => MS,
    "__declspec" => MS | BORLAND,
    "__cdecl" => ALL,
    "__stdcall" => ALL,
    "__fastcall" => ALL,
    "__thiscall" => ALL,
    "__vectorcall" => ALL,
    "__forceinline" => MS,
    "__unaligned" => MS,
    "__ptr64" => MS,
    "__ptr32" => MS,
    "__w64" => MS,
    "__uuidof" => MS | BORLAND,
    "__try" => MS | BORLAND,
    "__finally" => MS | BORLAND,
    "__leave" => MS | BORLAND,
    "__super" => MS,
    "__if_exists" => MS,
    "__if_not_exists" => MS,
    "__interface" => MS,
    // OpenCL address spaces and qualifiers
    "__global" => OPENCL,
    "__local" => OPENCL,
    "__constant" => OPENCL,
    "__private" => OPENCL,
    "__kernel" => OPENCL,
    "__read_only" => OPENCL,
    "__write_only" => OPENCL,
    "__read_write" => OPENCL,
    "half" => HALF,
    // AltiVec
    "__vector" => ALTIVEC,
    "__pixel" => ALTIVEC,
    // Objective-C ARC
    "__bridge" => ARC,
    "__bridge_transfer" => ARC,
    "__bridge_retained" => ARC,
    "__bridge_retain" => ARC,
    // Borland
    "_pascal" => BORLAND,
    "__pascal" => ALL,
    // Alternate spellings
    "__alignof__" => ALL,
    "__asm" => ALL,
    "__asm__" => ALL,
    "__attribute__" => ALL,
    "__complex" => ALL,
    "__complex__" => ALL,
    "__const" => ALL,
    "__const__" => ALL,
    "__decltype" => CXX,
    "__imag__" => ALL,
    "__inline" => ALL,
    "__inline__" => ALL,
    "__nullptr" => CXX,
    "__real__" => ALL,
    "__restrict" => ALL,
    "__restrict__" => ALL,
    "__signed" => ALL,
    "__signed__" => ALL,
    "__typeof" => ALL,
    "__typeof__" => ALL,
    "__volatile" => ALL,
    "__volatile__" => ALL,
    "__builtin_alignof" => ALL,
    "_alignof" => MS,
    "_asm" => MS,
    "_cdecl" => MS | BORLAND,
    "_fastcall" => MS | BORLAND,
    "_stdcall" => MS | BORLAND,
    "_thiscall" => MS,
    "_vectorcall" => MS,
    "_uuidof" => MS | BORLAND,
    "_inline" => MS,
    "_declspec" => MS,
];
