//! Backtracking interpreter for compiled programs.
//!
//! Paths are explored depth first: a split runs its first branch to
//! exhaustion before its second, and a slot tries its list's surfaces in
//! order. That is the order in which expansion produces phrases, so the
//! first accepted path is the first phrase that would have matched. Text is
//! checked as it is fed, so a path is abandoned at the first character that
//! diverges from the input.

use std::ops::ControlFlow;

use parlance_foundation::{Cursor, SlotBinding};
use parlance_lexicon::ResolvedList;

use crate::program::{Inst, Program};

/// Executes a program against resolved lists.
pub struct Vm<'p> {
    program: &'p Program,
    /// Resolved values of each of the program's lists, in the same order
    lists: &'p [ResolvedList],
}

impl<'p> Vm<'p> {
    /// Creates a VM. `lists` must follow [`Program::lists`].
    #[must_use]
    pub fn new(program: &'p Program, lists: &'p [ResolvedList]) -> Self {
        Self { program, lists }
    }

    /// Explores every path from the start of the program.
    ///
    /// `accept` is called with the entry index and bindings of each accepted
    /// path, in order; returning `Break` stops the search.
    pub fn run<F>(&self, cursor: Cursor<'_>, mut accept: F)
    where
        F: FnMut(usize, &[SlotBinding]) -> ControlFlow<()>,
    {
        if self.program.is_empty() {
            return;
        }
        let mut bindings = Vec::new();
        let _ = self.exec(0, cursor, &mut bindings, &mut accept);
    }

    fn exec<F>(
        &self,
        mut pc: usize,
        mut cursor: Cursor<'_>,
        bindings: &mut Vec<SlotBinding>,
        accept: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut(usize, &[SlotBinding]) -> ControlFlow<()>,
    {
        loop {
            match &self.program.instructions()[pc] {
                Inst::Text(text) => {
                    if !cursor.feed(text) {
                        return ControlFlow::Continue(());
                    }
                    pc += 1;
                }
                Inst::Jump(target) => pc = *target,
                Inst::Split(first, second) => {
                    self.exec(*first, cursor.clone(), bindings, accept)?;
                    pc = *second;
                }
                Inst::Slot(slot) => {
                    let operand = &self.program.slots()[*slot];
                    let list = &self.lists[operand.list];
                    let name = operand.name.as_deref().unwrap_or(&*list.slot);
                    for value in list.values.iter() {
                        for surface in &value.surfaces {
                            let mut next = cursor.clone();
                            if !next.feed(surface) {
                                continue;
                            }
                            bindings.push(SlotBinding::new(name, value.value.as_str(), surface.as_str()));
                            let flow = self.exec(pc + 1, next, bindings, accept);
                            bindings.pop();
                            flow?;
                        }
                    }
                    return ControlFlow::Continue(());
                }
                Inst::Accept(entry) => {
                    if cursor.is_complete() {
                        return accept(*entry, bindings);
                    }
                    return ControlFlow::Continue(());
                }
                Inst::Fail => return ControlFlow::Continue(()),
            }
        }
    }
}
