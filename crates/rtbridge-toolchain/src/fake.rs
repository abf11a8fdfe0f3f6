//! A recording [`ProcessRunner`] for tests.
//!
//! Every invocation is recorded. Replies are chosen by the first rule whose
//! program and argument prefix match; unmatched invocations succeed with
//! empty output.

use std::cell::RefCell;
use std::io;

use crate::process::{Invocation, ProcessOutput, ProcessRunner};

type Effect = Box<dyn Fn(&Invocation)>;

enum Reply {
    Output(ProcessOutput),
    NotFound,
}

struct Rule {
    program: String,
    prefix: Vec<String>,
    reply: Reply,
    effect: Option<Effect>,
}

impl Rule {
    fn matches(&self, invocation: &Invocation) -> bool {
        let prefix: Vec<&str> = self.prefix.iter().map(String::as_str).collect();
        invocation.program() == self.program && invocation.args_start_with(&prefix)
    }
}

#[derive(Default)]
pub struct FakeRunner {
    rules: Vec<Rule>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `output` to `program` invoked with `prefix` as leading args.
    pub fn respond(mut self, program: &str, prefix: &[&str], output: ProcessOutput) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            reply: Reply::Output(output),
            effect: None,
        });
        self
    }

    /// Reply with exit code 1.
    pub fn fail(self, program: &str, prefix: &[&str]) -> Self {
        self.respond(program, prefix, ProcessOutput::failed(1))
    }

    /// Behave as if `program` is not installed.
    pub fn missing(mut self, program: &str) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            prefix: Vec::new(),
            reply: Reply::NotFound,
            effect: None,
        });
        self
    }

    /// Succeed and run `effect` (e.g. create the files a real tool would).
    pub fn with_effect(
        mut self,
        program: &str,
        prefix: &[&str],
        effect: impl Fn(&Invocation) + 'static,
    ) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            reply: Reply::Output(ProcessOutput::ok("")),
            effect: Some(Box::new(effect)),
        });
        self
    }

    /// All invocations seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Invocations of `program` with the given argument prefix.
    pub fn calls_to(&self, program: &str, prefix: &[&str]) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| inv.program() == program && inv.args_start_with(prefix))
            .cloned()
            .collect()
    }

    fn reply(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        let Some(rule) = self.rules.iter().find(|r| r.matches(invocation)) else {
            return Ok(ProcessOutput::ok(""));
        };
        if let Some(effect) = &rule.effect {
            effect(invocation);
        }
        match &rule.reply {
            Reply::Output(output) => Ok(output.clone()),
            Reply::NotFound => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: not found", invocation.program()),
            )),
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn output(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        self.reply(invocation)
    }

    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        self.reply(invocation)
    }
}
