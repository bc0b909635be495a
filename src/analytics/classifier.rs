// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

/// Minimum confidence for `suggest` to call a pick confident.
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

const FALLBACK_CATEGORY: &str = "Others";

#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
    pub weight: f64,
}

impl CategoryRule {
    pub fn new(category: &str, weight: f64, keywords: &[&str]) -> Self {
        CategoryRule {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weight,
        }
    }
}

/// The fixed taxonomy. Declaration order matters: ties between categories
/// are broken by the first one declared here.
pub static DEFAULT_TAXONOMY: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    vec![
        CategoryRule::new(
            "Food",
            1.0,
            &[
                "restaurant", "food", "meal", "lunch", "dinner", "breakfast", "cafe", "coffee",
                "pizza", "burger", "snack", "grocery", "supermarket", "kfc", "mcdonalds",
                "dominos", "zomato", "swiggy", "uber eats", "kitchen", "dining", "bakery",
                "juice", "tea",
            ],
        ),
        CategoryRule::new(
            "Transport",
            1.0,
            &[
                "uber", "taxi", "bus", "metro", "train", "fuel", "petrol", "diesel", "parking",
                "toll", "auto", "rickshaw", "ola", "transport", "travel", "flight", "airline",
                "ticket", "cab", "bike", "car",
            ],
        ),
        CategoryRule::new(
            "Entertainment",
            1.0,
            &[
                "movie", "cinema", "theatre", "netflix", "spotify", "amazon prime", "gaming",
                "game", "entertainment", "fun", "party", "club", "bar", "concert", "show",
                "sports", "gym", "fitness",
            ],
        ),
        CategoryRule::new(
            "Shopping",
            1.0,
            &[
                "amazon", "flipkart", "shopping", "clothes", "shoes", "electronics", "mobile",
                "laptop", "book", "gift", "online", "store", "mall", "purchase", "buy",
                "myntra", "nykaa",
            ],
        ),
        CategoryRule::new(
            "Healthcare",
            1.0,
            &[
                "doctor", "hospital", "medical", "pharmacy", "medicine", "health", "clinic",
                "dentist", "checkup", "treatment", "insurance", "apollo", "fortis", "tablet",
            ],
        ),
        CategoryRule::new(
            "Utilities",
            1.0,
            &[
                "electricity", "water", "gas", "internet", "phone", "mobile", "recharge",
                "bill", "utility", "wifi", "broadband", "jio", "airtel", "vodafone",
            ],
        ),
        // Rent gets a higher weight as its keywords are usually unambiguous.
        CategoryRule::new(
            "Rent",
            1.2,
            &[
                "rent", "house", "apartment", "flat", "home", "lease", "deposit",
                "maintenance", "society",
            ],
        ),
        CategoryRule::new(
            "Education",
            1.0,
            &[
                "school", "college", "university", "course", "training", "book", "education",
                "tuition", "fee", "study", "learning",
            ],
        ),
        CategoryRule::new(
            "Personal Care",
            1.0,
            &[
                "salon", "haircut", "beauty", "cosmetics", "personal", "care", "grooming",
                "spa", "massage",
            ],
        ),
        CategoryRule::new(
            "Others",
            0.5,
            &["miscellaneous", "other", "misc", "general", "various"],
        ),
    ]
});

/// Deterministic keyword-weighted classifier for free-text expense
/// descriptions. Pure: no store access, always returns a category.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl CategoryClassifier {
    pub fn new() -> Self {
        CategoryClassifier {
            rules: DEFAULT_TAXONOMY.clone(),
        }
    }

    /// Replace the taxonomy wholesale. Rule order defines tie-break order.
    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        CategoryClassifier { rules }
    }

    /// Returns the best category and a confidence in [0, 1].
    pub fn classify(&self, description: &str, amount: Option<Decimal>) -> (String, f64) {
        if description.is_empty() {
            return (FALLBACK_CATEGORY.to_string(), 0.0);
        }

        let haystack = description.to_lowercase();
        let whole = haystack.trim();
        let mut scores = vec![0.0_f64; self.rules.len()];

        for (i, rule) in self.rules.iter().enumerate() {
            for keyword in &rule.keywords {
                if haystack.contains(keyword.as_str()) {
                    if whole == keyword.as_str() {
                        // Exact whole-string match supersedes the substring
                        // contribution for this keyword.
                        scores[i] += 2.0 * rule.weight;
                    } else {
                        scores[i] += 1.0 * rule.weight;
                    }
                }
            }
        }

        // Amount heuristics apply whether or not the category matched a
        // keyword: very large amounts smell like rent, very small ones like
        // food or transport.
        if let Some(amount) = amount {
            if amount > Decimal::from(20_000) {
                self.bump(&mut scores, "Rent", 0.3);
            } else if amount < Decimal::from(100) {
                self.bump(&mut scores, "Food", 0.2);
                self.bump(&mut scores, "Transport", 0.2);
            }
        }

        if scores.iter().all(|&s| s <= 0.0) {
            return (FALLBACK_CATEGORY.to_string(), 0.0);
        }

        let mut best = 0;
        for i in 1..scores.len() {
            if scores[i] > scores[best] {
                best = i;
            }
        }
        let winner = &self.rules[best];
        // Several matching keywords can push the raw score past the
        // single-keyword maximum, hence the clamp.
        let confidence = (scores[best] / (2.0 * winner.weight)).min(1.0);
        (winner.category.clone(), confidence)
    }

    /// Classification plus a confidence verdict at the fixed threshold.
    pub fn suggest(&self, description: &str, amount: Option<Decimal>) -> (String, bool) {
        let (category, confidence) = self.classify(description, amount);
        (category, confidence >= CONFIDENCE_THRESHOLD)
    }

    fn bump(&self, scores: &mut [f64], category: &str, delta: f64) {
        if let Some(i) = self.rules.iter().position(|r| r.category == category) {
            scores[i] += delta;
        }
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        CategoryClassifier::new()
    }
}
