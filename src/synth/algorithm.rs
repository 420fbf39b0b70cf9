//! Fixed catalogue of operator arrangements.
//!
//! Each arrangement is plain data: the modulation edges to wire and the slot
//! operators whose outputs form the voice output. Operator numbers in the
//! descriptions are 1-based, indices everywhere else are 0-based.

/// Operators per voice. The catalogue is written for exactly this many.
pub const OPERATOR_COUNT: usize = 4;

/// A modulation edge: `source`'s output modulates `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
    pub target: usize,
    pub source: usize,
}

const fn edge(target: usize, source: usize) -> Connection {
    Connection { target, source }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Arrangement {
    pub description: &'static str,
    /// Wired in order, so an operator's inputs keep this order.
    pub connections: &'static [Connection],
    pub slots: &'static [usize],
}

impl Arrangement {
    /// Inputs of `target` under this arrangement, in wiring order.
    pub fn inputs_of(&self, target: usize) -> impl Iterator<Item = usize> + '_ {
        self.connections
            .iter()
            .filter(move |c| c.target == target)
            .map(|c| c.source)
    }

    pub fn is_slot(&self, op: usize) -> bool {
        self.slots.contains(&op)
    }
}

pub static ARRANGEMENTS: [Arrangement; 10] = [
    Arrangement {
        description: "1>2>3>4",
        connections: &[edge(3, 2), edge(2, 1), edge(1, 0)],
        slots: &[3],
    },
    Arrangement {
        description: "1+2>3>4",
        connections: &[edge(3, 2), edge(2, 0), edge(2, 1)],
        slots: &[3],
    },
    Arrangement {
        description: "1+(2>3)>4",
        connections: &[edge(3, 0), edge(3, 2), edge(2, 1)],
        slots: &[3],
    },
    Arrangement {
        description: "(1>2)+3>4",
        connections: &[edge(3, 1), edge(3, 2), edge(1, 0)],
        slots: &[3],
    },
    Arrangement {
        description: "1>2,3>4",
        connections: &[edge(3, 2), edge(1, 0)],
        slots: &[3, 1],
    },
    Arrangement {
        description: "1>2,1>3,1>4",
        connections: &[edge(1, 0), edge(2, 0), edge(3, 0)],
        slots: &[1, 2, 3],
    },
    Arrangement {
        description: "1>2,3,4",
        connections: &[edge(1, 0)],
        slots: &[1, 2, 3],
    },
    Arrangement {
        description: "1,2,3,4",
        connections: &[],
        slots: &[0, 1, 2, 3],
    },
    Arrangement {
        description: "1>2",
        connections: &[edge(1, 0)],
        slots: &[1],
    },
    Arrangement {
        description: "1",
        connections: &[],
        slots: &[0],
    },
];

pub fn num_arrangements() -> usize {
    ARRANGEMENTS.len()
}

pub fn arrangement(index: usize) -> Option<&'static Arrangement> {
    ARRANGEMENTS.get(index)
}

pub fn description(index: usize) -> &'static str {
    arrangement(index).map_or("", |a| a.description)
}
