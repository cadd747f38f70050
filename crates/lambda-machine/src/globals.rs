//! Owner table of named global indirection cells.
//!
//! Slots are allocated before their defining templates are compiled and
//! filled exactly once afterwards, which is what lets definitions refer to
//! themselves and to each other. A [`Slot`] is a weak handle plus a stable
//! id, so a cell whose value mentions its own slot forms no ownership cycle.

use crate::env::Env;
use crate::error::{MachineError, MachineResult};
use crate::node::LiveNode;
use crate::template::Template;
use lambda_types::{Diagnostic, ErrorCode, FileInfo, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Stable index of a cell in its [`GlobalTable`].
pub type SlotId = usize;

struct GlobalCell {
    name: String,
    value: Option<LiveNode>,
}

/// Named, fill-once cells shared by every reference to a global.
#[derive(Default)]
pub struct GlobalTable {
    cells: RefCell<Vec<GlobalCell>>,
    names: RefCell<BTreeMap<String, SlotId>>,
}

/// Handle to one cell of a [`GlobalTable`].
#[derive(Clone)]
pub struct Slot {
    table: Weak<GlobalTable>,
    id: SlotId,
}

impl GlobalTable {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Allocate an unfilled slot for `name`.
    pub fn declare(self: &Rc<Self>, name: &str, at: Option<FileInfo>) -> Result<Slot> {
        let mut names = self.names.borrow_mut();
        if names.contains_key(name) {
            return Err(Diagnostic::duplicate_definition(name, at));
        }
        let mut cells = self.cells.borrow_mut();
        let id = cells.len();
        cells.push(GlobalCell {
            name: name.to_string(),
            value: None,
        });
        names.insert(name.to_string(), id);
        debug!(name, id, "declared global");
        Ok(self.handle(id))
    }

    /// The slot previously declared for `name`.
    pub fn lookup(self: &Rc<Self>, name: &str, at: Option<FileInfo>) -> Result<Slot> {
        match self.names.borrow().get(name) {
            Some(&id) => Ok(self.handle(id)),
            None => Err(Diagnostic::undefined_global(name, at)),
        }
    }

    /// Fill a slot with its value. Each slot is filled exactly once.
    pub fn fill(&self, slot: &Slot, value: LiveNode) -> MachineResult<()> {
        if !std::ptr::eq(slot.table.as_ptr(), self) {
            return Err(MachineError::ForeignSlot { id: slot.id });
        }
        let mut cells = self.cells.borrow_mut();
        let cell = cells
            .get_mut(slot.id)
            .ok_or(MachineError::ForeignSlot { id: slot.id })?;
        if cell.value.is_some() {
            return Err(MachineError::SlotRefilled {
                name: cell.name.clone(),
            });
        }
        debug!(name = %cell.name, kind = value.kind_name(), "filled global");
        cell.value = Some(value);
        Ok(())
    }

    /// Materialize a definition against the empty environment and fill its
    /// slot with the result.
    pub fn define(&self, slot: &Slot, template: &Template) -> MachineResult<()> {
        let value = template.materialize(&Env::empty())?;
        self.fill(slot, value)
    }

    /// Declare and fill in one step, for host-supplied values.
    pub fn define_value(self: &Rc<Self>, name: &str, value: LiveNode) -> Result<Slot> {
        let slot = self.declare(name, None)?;
        self.fill(&slot, value).map_err(|err| {
            Diagnostic::new(ErrorCode::DUPLICATE_DEFINITION, err.to_string(), None)
        })?;
        Ok(slot)
    }

    /// Current value of a global, if declared and filled.
    pub fn value(&self, name: &str) -> Option<LiveNode> {
        let id = *self.names.borrow().get(name)?;
        self.cells.borrow()[id].value.clone()
    }

    /// Declared names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.names.borrow().keys().cloned().collect()
    }

    /// Names declared but never filled; a linker reports these before
    /// evaluation starts.
    pub fn unfilled(&self) -> Vec<String> {
        self.cells
            .borrow()
            .iter()
            .filter(|cell| cell.value.is_none())
            .map(|cell| cell.name.clone())
            .collect()
    }

    fn handle(self: &Rc<Self>, id: SlotId) -> Slot {
        Slot {
            table: Rc::downgrade(self),
            id,
        }
    }
}

impl Slot {
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Name the slot was declared under.
    pub fn name(&self) -> Option<String> {
        let table = self.table.upgrade()?;
        let cells = table.cells.borrow();
        cells.get(self.id).map(|cell| cell.name.clone())
    }

    pub fn is_filled(&self) -> bool {
        self.table
            .upgrade()
            .map(|table| {
                let cells = table.cells.borrow();
                cells.get(self.id).is_some_and(|cell| cell.value.is_some())
            })
            .unwrap_or(false)
    }

    /// Dereference once: the global's current value.
    pub fn get(&self) -> MachineResult<LiveNode> {
        let table = self.table.upgrade().ok_or(MachineError::DanglingSlot)?;
        let cells = table.cells.borrow();
        let cell = cells.get(self.id).ok_or(MachineError::DanglingSlot)?;
        cell.value.clone().ok_or_else(|| MachineError::UnfilledSlot {
            name: cell.name.clone(),
        })
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Slot({}, {name})", self.id),
            None => write!(f, "Slot({})", self.id),
        }
    }
}
