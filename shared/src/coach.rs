//! Scripted eco-coach
//!
//! Replies are fixed templates keyed by topic or keyword. Numeric and
//! word slots are filled from a caller-supplied RNG, so a seeded generator
//! gives reproducible conversations.

use crate::models::{EcoProfile, INITIAL_ECO_SCORE};
use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// Templates
// ============================================================================

/// A placeholder filled when a template is rendered
#[derive(Debug, Clone, Copy)]
pub enum Slot {
    /// Integer drawn from `low..high`
    Number { low: u32, high: u32 },
    /// One word picked uniformly
    Choice(&'static [&'static str]),
    /// The profile's current EcoScore
    EcoScore,
}

/// Reply text with `{}` placeholders, filled left to right from `slots`
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub text: &'static str,
    pub slots: &'static [Slot],
}

impl Template {
    const fn fixed(text: &'static str) -> Self {
        Self { text, slots: &[] }
    }

    /// Fill the placeholders
    pub fn render<R: Rng>(&self, profile: &EcoProfile, rng: &mut R) -> String {
        let mut out = String::with_capacity(self.text.len() + 16);
        let mut slots = self.slots.iter();
        let mut pieces = self.text.split("{}").peekable();

        while let Some(piece) = pieces.next() {
            out.push_str(piece);
            if pieces.peek().is_none() {
                break;
            }
            match slots.next() {
                Some(Slot::Number { low, high }) => out.push_str(&rng.gen_range(*low..*high).to_string()),
                Some(Slot::Choice(words)) => out.push_str(words[rng.gen_range(0..words.len())]),
                Some(Slot::EcoScore) => out.push_str(&profile.eco_score.to_string()),
                None => {}
            }
        }
        out
    }

    /// True when `reply` could have been rendered from this template
    pub fn matches(&self, reply: &str) -> bool {
        let pieces: Vec<&str> = self.text.split("{}").collect();
        let (first, rest) = match pieces.split_first() {
            Some(split) => split,
            None => return false,
        };
        let Some(mut remaining) = reply.strip_prefix(first) else {
            return false;
        };
        for (i, piece) in rest.iter().enumerate() {
            let is_last = i + 1 == rest.len();
            if is_last {
                return remaining.ends_with(piece) && remaining.len() >= piece.len();
            }
            match remaining.find(piece) {
                Some(idx) => remaining = &remaining[idx + piece.len()..],
                None => return false,
            }
        }
        remaining.is_empty()
    }
}

// ============================================================================
// Topic replies
// ============================================================================

/// Quick-ask topics offered by the coach panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachTopic {
    Transport,
    Energy,
    Diet,
}

impl std::str::FromStr for CoachTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transport" => Ok(CoachTopic::Transport),
            "energy" => Ok(CoachTopic::Energy),
            "diet" => Ok(CoachTopic::Diet),
            _ => Err(format!("Unknown coach topic: {}", s)),
        }
    }
}

const TRANSPORT_REPLIES: &[Template] = &[
    Template {
        text: "Based on your location, I found 3 bike-friendly routes near you that could save {}kg CO₂ annually! Want me to map them out? 🚲",
        slots: &[Slot::Number { low: 200, high: 700 }],
    },
    Template {
        text: "I noticed public transport in your area has improved efficiency by 15% this year. Switching just 2 days a week could save you ${} and reduce emissions! 🚌",
        slots: &[Slot::Number { low: 100, high: 300 }],
    },
    Template {
        text: "Electric vehicle adoption in your region is at {}%. I can calculate your potential savings from switching - interested? ⚡",
        slots: &[Slot::Number { low: 40, high: 70 }],
    },
];

const ENERGY_REPLIES: &[Template] = &[
    Template {
        text: "Your energy usage pattern suggests you could save {}kg CO₂ by shifting high-consumption activities to off-peak hours! 💡",
        slots: &[Slot::Number { low: 150, high: 450 }],
    },
    Template {
        text: "Solar potential in your area is {}% above average. Want me to estimate your solar savings? ☀️",
        slots: &[Slot::Number { low: 70, high: 90 }],
    },
    Template {
        text: "Smart thermostat optimization could reduce your heating emissions by {}% - shall I create a schedule? 🏠",
        slots: &[Slot::Number { low: 15, high: 40 }],
    },
];

const DIET_REPLIES: &[Template] = &[
    Template {
        text: "I found {} local farmers markets near you with 40% lower carbon footprint than supermarkets! 🥕",
        slots: &[Slot::Number { low: 3, high: 8 }],
    },
    Template {
        text: "Plant-based protein sources in your area average {}% less CO₂ than meat. Want personalized meal suggestions? 🌱",
        slots: &[Slot::Number { low: 20, high: 80 }],
    },
    Template {
        text: "Food waste in your region averages {}kg per month. I can help you optimize portion planning! 🍽️",
        slots: &[Slot::Number { low: 15, high: 25 }],
    },
];

/// Sent after every topic reply
pub const FOLLOW_UP: &str =
    "Would you like me to create a personalized action plan for this area? I can break it down into weekly goals! 🎯";

pub const GREETINGS: &[Template] = &[
    Template::fixed("Hello! I'm EcoBot, your personal sustainability companion. I've analyzed your patterns and I'm excited to help you make a bigger impact! 🌱"),
    Template::fixed("Hey there, eco-warrior! Ready to take your green game to the next level? I've got some personalized insights just for you! 🚀"),
    Template::fixed("Welcome back! I've been monitoring global climate data and I have some exciting opportunities for you to make a difference! 🌍"),
];

/// Encouragement shown with the profile summary
pub const PROGRESS_INSIGHTS: &[Template] = &[
    Template {
        text: "Your EcoScore of {} puts you in the top {}% of users globally! 🏆",
        slots: &[Slot::EcoScore, Slot::Number { low: 10, high: 25 }],
    },
    Template {
        text: "You've inspired an estimated {} people through your actions - that's {}kg additional CO₂ saved! 🌟",
        slots: &[
            Slot::Number { low: 20, high: 70 },
            Slot::Number { low: 1000, high: 3000 },
        ],
    },
    Template {
        text: "Based on your progress, you're on track to achieve carbon neutrality {} months ahead of schedule! 📈",
        slots: &[Slot::Number { low: 6, high: 18 }],
    },
];

/// Candidate replies for a topic
pub fn topic_templates(topic: CoachTopic) -> &'static [Template] {
    match topic {
        CoachTopic::Transport => TRANSPORT_REPLIES,
        CoachTopic::Energy => ENERGY_REPLIES,
        CoachTopic::Diet => DIET_REPLIES,
    }
}

fn pick<'a, R: Rng>(templates: &'a [Template], rng: &mut R) -> &'a Template {
    &templates[rng.gen_range(0..templates.len())]
}

/// Reply to a quick-ask topic
pub fn topic_response<R: Rng>(topic: CoachTopic, profile: &EcoProfile, rng: &mut R) -> String {
    pick(topic_templates(topic), rng).render(profile, rng)
}

/// Opening line of a chat
pub fn greeting<R: Rng>(profile: &EcoProfile, rng: &mut R) -> String {
    pick(GREETINGS, rng).render(profile, rng)
}

/// One progress line for the profile summary
pub fn progress_insight<R: Rng>(profile: &EcoProfile, rng: &mut R) -> String {
    pick(PROGRESS_INSIGHTS, rng).render(profile, rng)
}

// ============================================================================
// Free-text replies
// ============================================================================

/// Keyword replies, checked in order; the first keyword contained in the message wins
pub const KEYWORD_REPLIES: &[(&str, Template)] = &[
    ("help", Template::fixed("I'm here to help! I can assist with carbon calculations, sustainable living tips, local green options, and tracking your progress. What specific area interests you most? 🤝")),
    ("calculate", Template::fixed("I'd be happy to help calculate your impact! I can analyze transportation, energy, diet, waste, and even shopping patterns. Which area would you like to focus on first? 📊")),
    ("local", Template::fixed("Based on your location, I have data on local sustainability options, green businesses, recycling centers, and eco-friendly transport routes. What are you looking for specifically? 📍")),
    ("save", Template {
        text: "Great question! The average person can save {}kg CO₂ annually through smart choices. Your biggest opportunities are likely in {} and {}! 💰",
        slots: &[
            Slot::Number { low: 1000, high: 3000 },
            Slot::Choice(&["transport", "energy", "diet"]),
            Slot::Choice(&["waste reduction", "consumer choices", "home efficiency"]),
        ],
    }),
    ("climate", Template::fixed("Climate action is urgent, but every individual action matters! Collectively, users like you have already saved 2.5 million tons of CO₂. Your personal actions also inspire others - studies show each person influences 3-5 others! 🌍")),
    ("how", Template::fixed("There are many ways to reduce your footprint! The most impactful are usually: 1) Transportation changes 2) Home energy efficiency 3) Diet adjustments 4) Conscious consumption. Which resonates most with your lifestyle? 🛣️")),
];

/// Replies used when no keyword matches
pub const DEFAULT_REPLIES: &[Template] = &[
    Template {
        text: "That's a thoughtful question! Based on your current EcoScore of {}, I'd recommend focusing on your highest-impact opportunities first. 💭",
        slots: &[Slot::EcoScore],
    },
    Template::fixed("Interesting point! Did you know that small daily changes compound over time? I can help you identify the changes that would make the biggest difference for your specific situation! 📈"),
    Template {
        text: "I love your curiosity about sustainability! From analyzing thousands of users, I've found that people like you typically see the best results by starting with {}. Shall we dive deeper? 🔍",
        slots: &[Slot::Choice(&["transportation", "energy efficiency", "sustainable diet"])],
    },
    Template::fixed("Great question! Every situation is unique, which is why I personalize my recommendations. Based on your location, lifestyle, and goals, I can suggest the most effective changes for you specifically! 🎯"),
];

/// Reply to a free-text chat message
pub fn keyword_response<R: Rng>(message: &str, profile: &EcoProfile, rng: &mut R) -> String {
    let normalized = message.trim().to_lowercase();
    match KEYWORD_REPLIES
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
    {
        Some((_, template)) => template.render(profile, rng),
        None => pick(DEFAULT_REPLIES, rng).render(profile, rng),
    }
}

// ============================================================================
// Insight cards
// ============================================================================

/// A card in the personalized insights panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightCard {
    pub icon: String,
    pub title: String,
    pub description: String,
}

fn card(icon: &str, title: &str, description: String) -> InsightCard {
    InsightCard {
        icon: icon.to_string(),
        title: title.to_string(),
        description,
    }
}

/// Off-peak electricity window: after 22:00 or before 06:00
pub fn is_off_peak(hour: u32) -> bool {
    hour > 22 || hour < 6
}

/// Insight cards for the caller's local wall-clock time
pub fn daily_insights<R: Rng>(now: NaiveDateTime, profile: &EcoProfile, rng: &mut R) -> [InsightCard; 3] {
    let energy = if is_off_peak(now.hour()) {
        "Off-peak hours! Great time for energy-intensive tasks."
    } else {
        "Peak hours - consider reducing energy usage now."
    };

    let is_weekday = now.weekday().number_from_monday() <= 5;
    let transport = if is_weekday {
        "Weekday commute - perfect for trying sustainable transport!"
    } else {
        "Weekend trips - consider combining errands to reduce driving."
    };

    let earned = profile.eco_score - INITIAL_ECO_SCORE + rng.gen_range(0..100);

    [
        card("fas fa-lightbulb", "Energy Opportunity", energy.to_string()),
        card("fas fa-route", "Transport Insight", transport.to_string()),
        card(
            "fas fa-chart-line",
            "Progress Update",
            format!("You've earned {} points this week - excellent progress!", earned),
        ),
    ]
}
