//! Contact form state machine and its arithmetic CAPTCHA.
//!
//! The form never talks to the network itself. [`ContactForm::begin_submit`]
//! hands back the message to deliver; the caller sends it (on a worker
//! thread in the app, inline in tests) and reports the outcome through
//! [`ContactForm::finish_submit`].

use std::fmt;
use std::time::Duration;

use termfolio_net::{ContactMessage, EmailRelay};
use termfolio_types::error::Result;

// ---------------------------------------------------------------------------
// RNG
// ---------------------------------------------------------------------------

/// Small xorshift64* generator. Not cryptographic.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    /// Seed from the wall clock.
    pub fn from_time() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform-ish value in `lo..=hi`.
    pub fn range(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi);
        let span = u64::from(hi - lo) + 1;
        lo + (self.next_u64() % span) as u32
    }
}

// ---------------------------------------------------------------------------
// CAPTCHA
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaOp {
    Add,
    Subtract,
    Multiply,
}

impl CaptchaOp {
    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
        }
    }
}

/// An arithmetic challenge. Operands are chosen so every answer is a
/// non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    pub a: u32,
    pub b: u32,
    pub op: CaptchaOp,
}

impl Captcha {
    pub fn generate(rng: &mut SimpleRng) -> Self {
        match rng.range(0, 2) {
            0 => Self {
                a: rng.range(1, 20),
                b: rng.range(1, 20),
                op: CaptchaOp::Add,
            },
            1 => Self {
                a: rng.range(10, 29),
                b: rng.range(1, 10),
                op: CaptchaOp::Subtract,
            },
            _ => Self {
                a: rng.range(1, 10),
                b: rng.range(1, 10),
                op: CaptchaOp::Multiply,
            },
        }
    }

    /// The question, e.g. `"7 * 6"`.
    pub fn question(&self) -> String {
        format!("{} {} {}", self.a, self.op.symbol(), self.b)
    }

    /// Expected answer as decimal text.
    pub fn answer(&self) -> String {
        let v = match self.op {
            CaptchaOp::Add => self.a + self.b,
            CaptchaOp::Subtract => self.a - self.b,
            CaptchaOp::Multiply => self.a * self.b,
        };
        v.to_string()
    }

    /// Whether `input` (surrounding whitespace ignored) is the answer.
    pub fn check(&self, input: &str) -> bool {
        input.trim() == self.answer()
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Input fields in entry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Captcha,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Subject,
        Field::Message,
        Field::Captcha,
    ];

    /// Shell-flavored prompt label shown before the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "$ echo \"Your Name\"",
            Self::Email => "$ echo \"Your Email\"",
            Self::Subject => "$ echo \"Subject\"",
            Self::Message => "$ cat > message.txt",
            Self::Captcha => "$ calculate:",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Enter your name...",
            Self::Email => "your.email@example.com",
            Self::Subject => "Brief subject line...",
            Self::Message => "Type your message here...",
            Self::Captcha => "Enter the result...",
        }
    }

    /// The field after this one, or `None` after the CAPTCHA.
    pub fn next(self) -> Option<Field> {
        let i = Self::ALL.iter().position(|&f| f == self)?;
        Self::ALL.get(i + 1).copied()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Captcha => "answer",
        })
    }
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    /// A required field is blank.
    Incomplete(Field),
    /// The CAPTCHA answer was wrong; nothing was sent.
    CaptchaError,
    /// Waiting for the relay.
    Sending,
    /// Delivered; the confirmation hides at `hide_at`.
    Sent { hide_at: Duration },
}

/// The contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub fields: ContactMessage,
    answer: String,
    captcha: Captcha,
    state: FormState,
    rng: SimpleRng,
    confirmation: Duration,
}

impl ContactForm {
    pub fn new(mut rng: SimpleRng, confirmation: Duration) -> Self {
        Self {
            fields: ContactMessage::default(),
            answer: String::new(),
            captcha: Captcha::generate(&mut rng),
            state: FormState::Editing,
            rng,
            confirmation,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn captcha(&self) -> &Captcha {
        &self.captcha
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.fields.name,
            Field::Email => &self.fields.email,
            Field::Subject => &self.fields.subject,
            Field::Message => &self.fields.message,
            Field::Captcha => &self.answer,
        }
    }

    /// Replace a field's contents. Clears any validation error.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.fields.name = value,
            Field::Email => self.fields.email = value,
            Field::Subject => self.fields.subject = value,
            Field::Message => self.fields.message = value,
            Field::Captcha => self.answer = value,
        }
        if matches!(self.state, FormState::CaptchaError | FormState::Incomplete(_)) {
            self.state = FormState::Editing;
        }
    }

    /// Draw a new challenge and forget the typed answer.
    pub fn refresh_captcha(&mut self) {
        self.captcha = Captcha::generate(&mut self.rng);
        self.answer.clear();
    }

    /// Validate and, if everything checks out, move to `Sending` and return
    /// the message to deliver. Returns `None` (no send) otherwise.
    pub fn begin_submit(&mut self) -> Option<ContactMessage> {
        if self.state == FormState::Sending {
            return None;
        }
        if let Some(&missing) = Field::ALL
            .iter()
            .find(|&&f| f != Field::Captcha && self.value(f).trim().is_empty())
        {
            self.state = FormState::Incomplete(missing);
            return None;
        }
        if !self.captcha.check(&self.answer) {
            log::debug!("Contact form CAPTCHA mismatch");
            self.state = FormState::CaptchaError;
            return None;
        }
        self.state = FormState::Sending;
        Some(self.fields.clone())
    }

    /// Apply the relay's verdict.
    ///
    /// Success clears every field and shows the confirmation until
    /// `now + confirmation`. Failure keeps the fields. Both draw a new
    /// CAPTCHA.
    pub fn finish_submit(&mut self, result: Result<()>, now: Duration) {
        self.refresh_captcha();
        match result {
            Ok(()) => {
                log::info!("Contact message sent");
                self.fields = ContactMessage::default();
                self.state = FormState::Sent {
                    hide_at: now + self.confirmation,
                };
            },
            Err(e) => {
                log::error!("Failed to send contact message: {e}");
                self.state = FormState::Editing;
            },
        }
    }

    /// Hide the confirmation once its time is up.
    pub fn tick(&mut self, now: Duration) {
        if let FormState::Sent { hide_at } = self.state
            && now >= hide_at
        {
            self.state = FormState::Editing;
        }
    }

    /// Validate, send through `relay` on the calling thread, and apply the
    /// result. Returns whether a send was attempted.
    pub fn submit_with(&mut self, relay: &dyn EmailRelay, now: Duration) -> bool {
        match self.begin_submit() {
            Some(msg) => {
                let result = relay.send(&msg);
                self.finish_submit(result, now);
                true
            },
            None => false,
        }
    }
}
