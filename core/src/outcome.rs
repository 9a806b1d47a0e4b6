/// The explicit result of running one event.
///
/// `Outcome` represents "Control Flow as Data": the driver never decides
/// where to go next inside an effect, it matches on what the effect returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Proceed to the next event in queue order.
    Next,

    /// Continue at the given queue index (loop replay).
    Jump(usize),

    /// The engine was stopped while the event ran.
    Cancelled,
}

impl Outcome {
    /// Queue index to run after the event at `index`, or `None` to halt.
    pub fn next_index(self, index: usize) -> Option<usize> {
        match self {
            Outcome::Next => Some(index + 1),
            Outcome::Jump(target) => Some(target),
            Outcome::Cancelled => None,
        }
    }
}
