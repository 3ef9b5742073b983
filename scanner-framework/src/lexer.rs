use crate::context::{DefaultContext, LexContext};
use crate::error::{ScanError, ScanResult};
use crate::traits::LexingRule;
use std::cmp::Reverse;
use tracing::warn;

/// A lexer that applies rules in priority order.
pub struct Lexer<Ctx, Tok>
where
    Ctx: LexContext,
{
    context: Ctx,
    rules: Vec<Box<dyn LexingRule<Ctx, Tok>>>,
}

impl<Ctx, Tok> Lexer<Ctx, Tok>
where
    Ctx: LexContext,
{
    /// Creates a new lexer with the given context and rules.
    pub fn new(context: Ctx, rules: Vec<Box<dyn LexingRule<Ctx, Tok>>>) -> Self {
        // Highest priority first; equal priorities keep their given order.
        let mut sorted_rules = rules;
        sorted_rules.sort_by_key(|rule| Reverse(rule.priority()));

        Self {
            context,
            rules: sorted_rules,
        }
    }

    /// Returns a reference to the context.
    pub fn context(&self) -> &Ctx {
        &self.context
    }

    /// Returns a mutable reference to the context.
    pub fn context_mut(&mut self) -> &mut Ctx {
        &mut self.context
    }

    /// Tries to match the next token using the rules.
    ///
    /// Rules whose `quick_check` rules them out are skipped, the others are
    /// tried from a checkpoint that is restored when they do not match.
    /// Malformed input ends the attempt immediately.
    pub fn next_token(&mut self) -> ScanResult<Tok> {
        let first_char = self.context.peek();

        for rule in &mut self.rules {
            if let Some(false) = rule.quick_check(first_char) {
                continue;
            }

            let checkpoint = self.context.checkpoint();
            if let Some(token) = rule.try_match(&mut self.context)? {
                return Ok(Some(token));
            }
            self.context.restore(checkpoint);
        }
        Ok(None)
    }

    /// Collects all tokens from the input, stopping at the first malformed
    /// construct.
    pub fn tokenize(&mut self) -> Result<Vec<Tok>, ScanError> {
        self.collect()
    }
}

impl<Tok> Lexer<DefaultContext, Tok> {
    /// Creates a new lexer with a default context from an input string.
    pub fn from_str<S: Into<String>>(
        input: S,
        rules: Vec<Box<dyn LexingRule<DefaultContext, Tok>>>,
    ) -> Self {
        Self::new(DefaultContext::new(input), rules)
    }
}

/// Yields tokens until the input is exhausted, no rule matches, or a rule
/// reports malformed input (yielded once, then iteration ends).
impl<Ctx, Tok> Iterator for Lexer<Ctx, Tok>
where
    Ctx: LexContext,
{
    type Item = Result<Tok, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.context.is_eof() {
            return None;
        }

        let offset_before = self.context.offset();

        match self.next_token() {
            Ok(Some(token)) => {
                if self.context.offset() == offset_before {
                    warn!(offset = offset_before, "rule matched without consuming input");
                    return None;
                }
                Some(Ok(token))
            }
            Ok(None) => {
                warn!(
                    offset = offset_before,
                    current = ?self.context.peek(),
                    "no rule matched"
                );
                None
            }
            Err(err) => {
                let end = self.context.cursor().buffer().len();
                self.context.cursor_mut().seek(end);
                Some(Err(err))
            }
        }
    }
}
