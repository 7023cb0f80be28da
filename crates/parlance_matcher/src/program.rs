//! Compiled form of a whole grammar.
//!
//! Every template of every intent is compiled into one instruction list. The
//! top level is an alternation over templates in match priority order, and
//! each template ends in `Accept` naming its entry:
//!
//! ```text
//! 0000  split    1, 7        ; template 0 or the rest
//! 0001  split    2, 4        ; (apri|chiudi)
//! 0002  text     "apri"
//! 0003  jump     5
//! 0004  text     "chiudi"
//! 0005  text     " "
//! 0006  slot     0           ; {le_name}
//! ...
//! ```
//!
//! Only forward jumps are emitted, so every path through the program is
//! finite.

use std::fmt;

use parlance_template::{Part, SlotRef, Template};

use crate::grammar::{EntryId, Grammar};

/// A single instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inst {
    /// Feed literal text to the cursor.
    Text(Box<str>),
    /// Try every surface of a slot's list, by index into [`Program::slots`].
    Slot(usize),
    /// Try the first address, then the second.
    Split(usize, usize),
    /// Continue at an address.
    Jump(usize),
    /// Succeed if the whole input was consumed, by index into
    /// [`Program::entries`].
    Accept(usize),
    /// Dead end.
    Fail,
}

/// A slot instruction's operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotOperand {
    /// Index into [`Program::lists`].
    pub list: usize,
    /// Explicit slot name; the list's default when absent.
    pub name: Option<String>,
}

/// The compiled program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Inst>,
    slots: Vec<SlotOperand>,
    lists: Vec<String>,
    entries: Vec<EntryId>,
}

impl Program {
    /// Compiles every template of a grammar.
    #[must_use]
    pub fn compile(grammar: &Grammar) -> Self {
        let templates: Vec<&Template> = grammar
            .entries()
            .iter()
            .map(|id| grammar.template(*id))
            .collect();

        let mut builder = Builder::default();
        builder.alternatives(&templates, |b, (index, template)| {
            b.sequence(template.parts());
            b.emit(Inst::Accept(index));
        });

        Self {
            instructions: builder.code,
            slots: builder.slots,
            lists: builder.lists,
            entries: grammar.entries().to_vec(),
        }
    }

    /// Returns the instructions.
    #[must_use]
    pub fn instructions(&self) -> &[Inst] {
        &self.instructions
    }

    /// Returns the slot operands.
    #[must_use]
    pub fn slots(&self) -> &[SlotOperand] {
        &self.slots
    }

    /// Returns the lists slot instructions draw from.
    #[must_use]
    pub fn lists(&self) -> &[String] {
        &self.lists
    }

    /// Returns the entry each `Accept` operand stands for.
    #[must_use]
    pub fn entries(&self) -> &[EntryId] {
        &self.entries
    }

    /// Returns the number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (address, inst) in self.instructions.iter().enumerate() {
            write!(f, "{address:04}  ")?;
            match inst {
                Inst::Text(text) => writeln!(f, "text     {text:?}")?,
                Inst::Slot(slot) => {
                    let operand = &self.slots[*slot];
                    let list = &self.lists[operand.list];
                    match &operand.name {
                        Some(name) => writeln!(f, "slot     {{{list}:{name}}}")?,
                        None => writeln!(f, "slot     {{{list}}}")?,
                    }
                }
                Inst::Split(first, second) => writeln!(f, "split    {first}, {second}")?,
                Inst::Jump(target) => writeln!(f, "jump     {target}")?,
                Inst::Accept(entry) => writeln!(f, "accept   {entry}")?,
                Inst::Fail => writeln!(f, "fail")?,
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct Builder {
    code: Vec<Inst>,
    slots: Vec<SlotOperand>,
    lists: Vec<String>,
}

impl Builder {
    fn emit(&mut self, inst: Inst) -> usize {
        self.code.push(inst);
        self.code.len() - 1
    }

    fn sequence(&mut self, parts: &[Part]) {
        for part in parts {
            self.part(part);
        }
    }

    fn part(&mut self, part: &Part) {
        match part {
            Part::Literal(text) => {
                self.emit(Inst::Text(text.as_str().into()));
            }
            Part::Optional(inner) => {
                let split = self.emit(Inst::Split(0, 0));
                self.sequence(inner);
                self.code[split] = Inst::Split(split + 1, self.code.len());
            }
            Part::Alternation(alternatives) => {
                self.alternatives(alternatives, |b, (_, alternative)| b.sequence(alternative));
            }
            Part::Slot(slot) => {
                let operand = self.slot_operand(slot);
                self.slots.push(operand);
                self.emit(Inst::Slot(self.slots.len() - 1));
            }
        }
    }

    /// Emits a split chain trying each item in order.
    fn alternatives<T>(&mut self, items: &[T], mut compile: impl FnMut(&mut Self, (usize, &T))) {
        if items.is_empty() {
            self.emit(Inst::Fail);
            return;
        }

        let last = items.len() - 1;
        let mut exits = Vec::with_capacity(last);
        for (index, item) in items.iter().enumerate() {
            if index == last {
                compile(self, (index, item));
                break;
            }
            let split = self.emit(Inst::Split(0, 0));
            compile(self, (index, item));
            exits.push(self.emit(Inst::Jump(0)));
            self.code[split] = Inst::Split(split + 1, self.code.len());
        }

        let end = self.code.len();
        for exit in exits {
            self.code[exit] = Inst::Jump(end);
        }
    }

    fn slot_operand(&mut self, slot: &SlotRef) -> SlotOperand {
        let list = match self.lists.iter().position(|l| *l == slot.list) {
            Some(index) => index,
            None => {
                self.lists.push(slot.list.clone());
                self.lists.len() - 1
            }
        };
        SlotOperand {
            list,
            name: slot.slot.clone(),
        }
    }
}
