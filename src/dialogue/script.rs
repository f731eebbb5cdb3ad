//! The scripted dialogue table — a pure function from (card id, input, step)
//! to the next system message and step.
//!
//! Selection walks a fixed, ordered table of entries top-to-bottom; the
//! first entry whose card-id fragment or fallback keyword matches wins.
//! Matching is deliberately not mutually exclusive: the keyword keeps the
//! function usable without a card id (e.g. from a console harness).

use serde::{Deserialize, Serialize};

/// The dialogue step cursor. Values are drawn from {0, 1, 2, 3};
/// 3 is the terminal "complete" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Step(pub u8);

impl Step {
    /// The opening step of a fresh session.
    pub const OPENING: Step = Step(0);
    /// The terminal sentinel — the dialogue has produced its strategy.
    pub const COMPLETE: Step = Step(3);

    /// Whether the dialogue has reached its terminal step.
    pub fn is_terminal(self) -> bool {
        self.0 >= Self::COMPLETE.0
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One dialogue turn: the system message and the step to carry forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub text: String,
    pub next_step: Step,
}

/// A card's interview script, tagged by how many clarifying turns it needs
/// before the terminal synthesis. Adding a card's script is a data
/// addition, not new control flow.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// Two clarifying questions: steps 0 → 1 → 2 → 3.
    /// `follow_up` echoes the previous answer via the `{input}` placeholder.
    TwoTurn {
        opening: &'static str,
        follow_up: &'static str,
        synthesis: &'static str,
    },
    /// One clarifying question, straight to the synthesis: steps 0 → 1 → 3.
    OneTurn {
        opening: &'static str,
        synthesis: &'static str,
    },
}

impl Script {
    fn run(&self, input: &str, step: Step) -> Turn {
        match *self {
            Script::TwoTurn {
                opening,
                follow_up,
                synthesis,
            } => match step.0 {
                0 => Turn {
                    text: opening.to_string(),
                    next_step: Step(1),
                },
                1 => Turn {
                    text: render(follow_up, input),
                    next_step: Step(2),
                },
                _ => Turn {
                    text: render(synthesis, input),
                    next_step: Step::COMPLETE,
                },
            },
            Script::OneTurn { opening, synthesis } => match step.0 {
                0 => Turn {
                    text: opening.to_string(),
                    next_step: Step(1),
                },
                _ => Turn {
                    text: render(synthesis, input),
                    next_step: Step::COMPLETE,
                },
            },
        }
    }
}

/// Substitute the most recent raw input into a message template.
fn render(template: &str, input: &str) -> String {
    template.replace("{input}", input.trim())
}

/// One row of the script table.
struct ScriptEntry {
    /// Case-folded fragment matched against the card id.
    id_fragment: &'static str,
    /// Fallback keyword matched case-insensitively inside the input.
    keyword: &'static str,
    script: Script,
}

impl ScriptEntry {
    fn matches(&self, card_id: Option<&str>, input_lower: &str) -> bool {
        let id_hit = card_id
            .map(|id| id.to_lowercase().contains(self.id_fragment))
            .unwrap_or(false);
        id_hit || input_lower.contains(self.keyword)
    }
}

/// Fixed fallback safety message for unmatched turns.
pub const FALLBACK_TEXT: &str = "SAFETY PROTOCOL ACTIVE.\n\n\
    I did not recognize the exact pattern for this card.\n\
    Please give more detail about what you need, or restart the protocol.";

/// Produce the next system message and step for a dialogue turn.
///
/// Deterministic: identical `(card_id, input, step)` always yields an
/// identical `Turn` — no randomness, no clocks, no I/O. An unmatched turn
/// returns [`FALLBACK_TEXT`] and echoes the step back unchanged, so the
/// conversation never advances on an unrecognized input.
pub fn respond(card_id: Option<&str>, input: &str, step: Step) -> Turn {
    let input_lower = input.to_lowercase();
    for entry in SCRIPTS {
        if entry.matches(card_id, &input_lower) {
            return entry.script.run(input, step);
        }
    }
    Turn {
        text: FALLBACK_TEXT.to_string(),
        next_step: step,
    }
}

/// The ordered script table, one entry per protocol card.
static SCRIPTS: &[ScriptEntry] = &[
    // ── Track 1: THE START (setup) ──────────────────────────────────
    ScriptEntry {
        id_fragment: "z1",
        keyword: "vector",
        script: Script::TwoTurn {
            opening: "PROTOCOL: VECTOR_TRIANGULATION\n\n\
                Let's find your place in the market.\n\n\
                Phase 1: THE TERRITORY.\n\
                What broad topic do you want to talk about? \
                (e.g. architecture, baking, English, personal finance).",
            follow_up: "Territory: \"{input}\".\n\n\
                Now let's find the GOLD inside it. To avoid being just another \
                account, we need an angle.\n\n\
                REFINEMENT QUESTION:\n\
                Which specific audience or pain do your competitors ignore? \
                (Instead of 'baking', say 'sugar-free baking for diabetics').\n\n\
                Define your sub-niche:",
            synthesis: "FINAL DIAGNOSIS:\n\n\
                You will not sell generic {input} content. You will sell the \
                SPECIFIC SOLUTION for that sub-niche.\n\n\
                Positioning: The Specialist.\n\
                Use your technical skill to solve that audience's pain \
                predictably.",
        },
    },
    ScriptEntry {
        id_fragment: "z2",
        keyword: "brand",
        script: Script::TwoTurn {
            opening: "PROTOCOL: SEO_INDEXING\n\n\
                The name exists to be FOUND.\n\n\
                STEP 1: THE SEARCH.\n\
                What is the main keyword your customer types into search? \
                (The master keyword).",
            follow_up: "Keyword: \"{input}\".\n\n\
                STEP 2: PERSONALITY.\n\
                How do you want to be perceived? (Serious, approachable, \
                aggressive?). Give me one adjective or your last name.",
            synthesis: "GENERATING OPTIMIZED NAMES:\n\n\
                1. Authority: @[LastName].{input}\n\
                2. Direct search: @{input}.[Adjective]\n\
                3. Institutional: @Protocol.{input}\n\n\
                Rule: no random numbers, no pointless dots.",
        },
    },
    ScriptEntry {
        id_fragment: "z3",
        keyword: "photo",
        script: Script::TwoTurn {
            opening: "PROTOCOL: VISUAL_CONTRAST\n\n\
                Your photo competes with a thousand others.\n\n\
                STEP 1: THE SUBJECT.\n\
                What color will you wear in the photo? (Ideal: solid colors).",
            follow_up: "Outfit: \"{input}\".\n\n\
                To trigger semiotic contrast the background must be the \
                OPPOSITE.\n\n\
                STEP 2: THE BACKGROUND.\n\
                If the outfit is light, the background must be dark (and vice \
                versa). Which color did you have in mind for the background?",
            synthesis: "VISUAL VALIDATION:\n\n\
                If you picked opposites (yellow on black, white on dark blue), \
                you will stand out.\n\n\
                Instruction: crop to a close-up. Your face should fill 60% of \
                the circle.",
        },
    },
    ScriptEntry {
        id_fragment: "z4",
        keyword: "bio",
        script: Script::TwoTurn {
            opening: "PROTOCOL: 3_LINE_FUNNEL\n\n\
                Your bio is a landing page.\n\n\
                LINE 1 (PROOF):\n\
                Give me one number that commands immediate respect (students, \
                years, revenue).",
            follow_up: "Proof received. Now the conversion.\n\n\
                LINE 2 (PROMISE):\n\
                Complete: 'I teach you how to...' (Focus on the END RESULT, \
                e.g. 'lose 5kg', 'invest from zero').",
            synthesis: "COMPILING BIO:\n\n\
                📍 [SOCIAL PROOF]\n\
                🚀 I help you {input}\n\
                👇 Start here (link)\n\n\
                Install it and do not touch it for 30 days.",
        },
    },
    // ── Track 2: THE CREATOR (influencer) ───────────────────────────
    ScriptEntry {
        id_fragment: "i1",
        keyword: "hook",
        script: Script::TwoTurn {
            opening: "PROTOCOL: ATTENTION_ENGINEERING\n\n\
                Videos die in the first 3 seconds.\n\n\
                STEP 1: THE TOPIC.\n\
                What is your next video about? Keep it brief.",
            follow_up: "Topic: \"{input}\".\n\n\
                Now we break the pattern. The classic mistake is opening with \
                \"hi everyone\".\n\n\
                STEP 2: THE BREAK.\n\
                What is the biggest lie or mistake people repeat about this \
                topic?",
            synthesis: "HOOK STRUCTURE GENERATED:\n\n\
                Visual: hold a strange object or make a fast movement.\n\
                Line: 'Stop doing [MISTAKE] if you want [RESULT].'\n\n\
                That cognitive paradox is what pins attention.",
        },
    },
    ScriptEntry {
        id_fragment: "i2",
        keyword: "edit",
        script: Script::TwoTurn {
            opening: "PROTOCOL: PACING_DYNAMICS\n\n\
                Editing is not effects, it is rhythm.\n\n\
                STEP 1: THE STYLE.\n\
                Is your video spoken (vlog/talking head) or narrated \
                (voice-over)?",
            follow_up: "Style: \"{input}\".\n\n\
                The brain hunts for novelty every 4 seconds.\n\n\
                STEP 2: THE SWITCH.\n\
                Do you have B-roll (coverage footage) or will you use zoom \
                in/out?",
            synthesis: "RETENTION PROTOCOL:\n\n\
                1. Cut every breath between sentences.\n\
                2. Every 4s, change something (zoom, on-screen text, B-roll).\n\
                3. Dynamic captions (one word at a time) raise retention by 20%.",
        },
    },
    ScriptEntry {
        id_fragment: "i3",
        keyword: "tribe",
        script: Script::TwoTurn {
            opening: "PROTOCOL: TRIBAL_ENGAGEMENT\n\n\
                Fans don't follow content, they follow values.\n\n\
                STEP 1: THE COMMON ENEMY.\n\
                Who or what does your tribe hate? (e.g. 'fake gurus', \
                'bureaucracy', 'starvation diets').",
            follow_up: "Enemy: \"{input}\". Excellent.\n\n\
                STEP 2: THE DEFENSE.\n\
                What hard truth do you need to say to defend your tribe from \
                that enemy?",
            synthesis: "POLARIZATION STRATEGY:\n\n\
                Make a video hitting the common enemy ({input}).\n\
                End by asking: 'Do you agree, or do you prefer to keep being \
                fooled?'\n\
                That will blow up the comments.",
        },
    },
    ScriptEntry {
        id_fragment: "i4",
        keyword: "kit",
        // Skips the second question to stay direct.
        script: Script::OneTurn {
            opening: "PROTOCOL: COMMERCIAL_PRESENTATION\n\n\
                Brands want numbers, not art.\n\n\
                STEP 1: THE REACH.\n\
                What was your average view count over the last 30 days? \
                (Sum your last 10 videos, divide by 10).",
            synthesis: "ONE-PAGE STRUCTURE:\n\n\
                Build a single-page PDF with:\n\
                1. Professional photo + bio.\n\
                2. Headline stat: {input} average views.\n\
                3. Who follows you (gender, age).\n\
                4. 'Brands I've worked with' (or 'Space for your brand').\n\n\
                Send that and nothing else.",
        },
    },
    // ── Track 3: THE MASTER (authority) ─────────────────────────────
    ScriptEntry {
        id_fragment: "a1",
        keyword: "ideas",
        script: Script::OneTurn {
            opening: "PROTOCOL: CONTENT_MATRIX_4X4\n\n\
                One pain spawns 4 videos.\n\n\
                STEP 1: THE PAIN.\n\
                What is the number-one question you get in your DMs? \
                (e.g. 'how to invest with little money').",
            synthesis: "MATRIX GENERATED FOR '{input}':\n\n\
                1. THE MYTH: 'They say you need to be rich — that's a lie.'\n\
                2. THE MISTAKE: 'You are losing money in your savings account.'\n\
                3. THE TIP: 'Start with 30 bucks right here...'\n\
                4. THE ANALYSIS: 'Reacting to a follower's portfolio.'\n\n\
                Record all four.",
        },
    },
    ScriptEntry {
        id_fragment: "a2",
        keyword: "script",
        script: Script::OneTurn {
            opening: "PROTOCOL: TROJAN_HORSE\n\n\
                Teach in order to sell.\n\n\
                STEP 1: THE DESIRE.\n\
                What does your student badly want to achieve? \
                (e.g. 'play the guitar').",
            synthesis: "SALES STRUCTURE:\n\n\
                1. Hook: 'How to {input} in record time.'\n\
                2. Content: teach one quick technique (instant win).\n\
                3. The gap: 'That is just 1% of the method.'\n\
                4. Pitch: 'If you want the rest, hit the link.'",
        },
    },
    ScriptEntry {
        id_fragment: "a3",
        keyword: "magnet",
        script: Script::OneTurn {
            opening: "PROTOCOL: PLATFORM_MIGRATION\n\n\
                You don't own your followers. You own your leads.\n\n\
                STEP 1: THE TOOL.\n\
                What can you deliver as a PDF that solves one quick pain? \
                (Checklist, spreadsheet, guide).",
            synthesis: "CAPTURE STRATEGY:\n\n\
                Create the '{input}' asset.\n\
                In your stories say: 'I put together the {input}. Anyone who \
                wants it, type I WANT IT and I'll DM it to you.'\n\n\
                Use automation to trade the PDF for an email.",
        },
    },
    ScriptEntry {
        id_fragment: "a4",
        keyword: "traffic",
        script: Script::OneTurn {
            opening: "PROTOCOL: STRATEGIC_AMPLIFICATION\n\n\
                Only boost what already worked.\n\n\
                STEP 1: THE CHAMPION.\n\
                What was your best organic video this month?",
            synthesis: "ADS CONFIGURATION:\n\n\
                Take the video '{input}'.\n\
                Objective: profile visits (to gain followers) or conversion \
                (to sell).\n\
                Audience: open (let the algorithm learn from the video).\n\
                Budget: $20/day for 3 days. If it performs, double it.",
        },
    },
    // ── Track 4: THE SELLER (shop) ──────────────────────────────────
    ScriptEntry {
        id_fragment: "s1",
        keyword: "storefront",
        script: Script::OneTurn {
            opening: "PROTOCOL: CREDIBILITY_HEURISTICS\n\n\
                A confused customer doesn't buy.\n\n\
                STEP 1: THE HIGHLIGHTS.\n\
                Do you have 'Customers' and 'About Me' story highlights? \
                (Yes/No).",
            synthesis: "STOREFRONT AUDIT:\n\n\
                If you don't, create them today.\n\
                1. 'Deliveries' highlight: repost stories of customers \
                receiving orders.\n\
                2. Bio: direct link to the product (no confusing link tree).\n\
                3. Photo: crisp logo or the owner's face.",
        },
    },
    ScriptEntry {
        id_fragment: "s2",
        keyword: "pain",
        script: Script::TwoTurn {
            opening: "PROTOCOL: NEURAL_AGITATION\n\n\
                Don't sell the product, sell the relief.\n\n\
                STEP 1: THE PRODUCT.\n\
                What do you sell? (e.g. sneakers, consulting, an ebook).",
            follow_up: "Product: \"{input}\".\n\n\
                STEP 2: THE DISCOMFORT.\n\
                What goes wrong in someone's life if they DON'T have it? \
                (e.g. 'back pain', 'money sitting idle').",
            synthesis: "AGITATION SCRIPT:\n\n\
                'Tired of [DISCOMFORT]?\n\
                I know how it feels. It's not your fault — it's the wrong \
                tool.\n\
                Meet the {input}: the only way to fix this today.'",
        },
    },
    ScriptEntry {
        id_fragment: "s3",
        keyword: "review",
        script: Script::OneTurn {
            opening: "PROTOCOL: UGC_AUTHENTICITY\n\n\
                A video that looks like an ad gets skipped.\n\n\
                STEP 1: THE SETTING.\n\
                Where is your product used in real life? (Kitchen, gym, office).",
            synthesis: "UGC SCRIPT (USER GENERATED):\n\n\
                Film handheld, no tripod, in the '{input}' setting.\n\
                Script: 'Guys, I had to show you this. It arrived today and it \
                changed my day. Look at this detail...'\n\n\
                No professional editing. Imperfection sells truth.",
        },
    },
    ScriptEntry {
        id_fragment: "s4",
        keyword: "boost",
        script: Script::OneTurn {
            opening: "PROTOCOL: SPARK_ADS_CONVERSION\n\n\
                Turn content into sales.\n\n\
                STEP 1: THE ID.\n\
                Do you have the post code of the review video published on \
                your account?",
            synthesis: "SPARK EXECUTION:\n\n\
                1. Open the ads manager.\n\
                2. Select 'Use existing account post'.\n\
                3. Pick the review post.\n\
                4. Button: 'Buy Now'.\n\n\
                This keeps the original likes and comments, stacking social \
                proof onto the ad.",
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_step_asks_first_question() {
        let turn = respond(Some("z1"), "start", Step::OPENING);
        assert!(turn.text.starts_with("PROTOCOL: VECTOR_TRIANGULATION"));
        assert_eq!(turn.next_step, Step(1));
    }

    #[test]
    fn two_turn_script_echoes_answer_at_step_one() {
        let turn = respond(Some("z1"), "woodworking", Step(1));
        assert!(turn.text.contains("Territory: \"woodworking\""));
        assert_eq!(turn.next_step, Step(2));
    }

    #[test]
    fn two_turn_script_synthesizes_at_step_two() {
        let turn = respond(Some("z1"), "hand tools for beginners", Step(2));
        assert!(turn.text.contains("FINAL DIAGNOSIS"));
        assert!(turn.text.contains("hand tools for beginners"));
        assert_eq!(turn.next_step, Step::COMPLETE);
    }

    #[test]
    fn one_turn_script_skips_second_question() {
        // i4 declares a single clarifying turn: step 1 goes straight to 3.
        let turn = respond(Some("i4"), "12000", Step(1));
        assert!(turn.text.contains("12000 average views"));
        assert_eq!(turn.next_step, Step::COMPLETE);
    }

    #[test]
    fn per_entry_turn_counts_are_independent() {
        // z2 still uses the full two-question shape at step 1.
        let turn = respond(Some("z2"), "sourdough", Step(1));
        assert_eq!(turn.next_step, Step(2));
        // a1 collapses at step 1.
        let turn = respond(Some("a1"), "how to start investing", Step(1));
        assert_eq!(turn.next_step, Step::COMPLETE);
    }

    #[test]
    fn keyword_selects_entry_without_card_id() {
        let turn = respond(None, "help me find my vector", Step::OPENING);
        assert!(turn.text.contains("VECTOR_TRIANGULATION"));
        assert_eq!(turn.next_step, Step(1));
    }

    #[test]
    fn card_id_match_is_case_folded() {
        let turn = respond(Some("Z3"), "anything", Step::OPENING);
        assert!(turn.text.contains("VISUAL_CONTRAST"));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let turn = respond(None, "MY BRAND NEEDS WORK", Step::OPENING);
        assert!(turn.text.contains("SEO_INDEXING"));
    }

    #[test]
    fn first_matching_entry_wins() {
        // Input mentions two keywords; z1 sits above z2 in the table.
        let turn = respond(None, "vector and brand", Step::OPENING);
        assert!(turn.text.contains("VECTOR_TRIANGULATION"));
    }

    #[test]
    fn unmatched_turn_returns_fallback_and_same_step() {
        for step in [Step(0), Step(1), Step(2)] {
            let turn = respond(Some("zz99"), "gibberish", step);
            assert_eq!(turn.text, FALLBACK_TEXT);
            assert_eq!(turn.next_step, step, "step must not advance");
        }
    }

    #[test]
    fn respond_is_referentially_transparent() {
        let a = respond(Some("s2"), "handmade candles", Step(1));
        let b = respond(Some("s2"), "handmade candles", Step(1));
        assert_eq!(a, b);
    }

    #[test]
    fn every_builtin_card_has_a_script() {
        let catalog = crate::content::Catalog::builtin();
        for track in catalog.tracks() {
            for card in &track.cards {
                let turn = respond(Some(&card.id), &card.activation_command, Step::OPENING);
                assert_ne!(
                    turn.text, FALLBACK_TEXT,
                    "card {} fell through to the fallback",
                    card.id
                );
                assert_eq!(turn.next_step, Step(1));
                // The activation command must not collide with an earlier
                // entry's keyword: it has to select the card's own script.
                let by_id = respond(Some(&card.id), "begin", Step::OPENING);
                assert_eq!(
                    turn.text, by_id.text,
                    "activation command for {} selected another entry",
                    card.id
                );
            }
        }
    }

    #[test]
    fn input_is_trimmed_before_interpolation() {
        let turn = respond(Some("i3"), "  fake gurus  ", Step(2));
        assert!(turn.text.contains("(fake gurus)"));
    }

    #[test]
    fn terminal_step_is_three() {
        assert!(Step::COMPLETE.is_terminal());
        assert!(!Step(2).is_terminal());
        assert_eq!(Step::COMPLETE, Step(3));
    }
}
