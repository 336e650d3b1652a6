// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::ir::{ComponentShape, Interface};

/// Number of threads in the component instance: one per provided, used,
/// emitted or consumed endpoint and per dataport, plus the control thread.
pub fn thread_count(interface: &Interface) -> usize {
    count_for(&interface.component)
}

pub fn count_for(shape: &ComponentShape) -> usize {
    [
        shape.provides,
        shape.uses,
        shape.emits,
        shape.consumes,
        shape.dataports,
    ]
    .into_iter()
    .fold(1usize, usize::saturating_add)
}
