//! Keyword-based domain detection for queries that name no domain.

use crate::types::Domain;

/// Trigger keywords per domain. Matched against lower-cased query words, unstemmed.
const DOMAIN_KEYWORDS: &[(Domain, &[&str])] = &[
    (
        Domain::Style,
        &[
            "style", "aesthetic", "minimal", "minimalism", "glassmorphism", "neumorphism",
            "brutalism", "brutalist", "flat", "skeuomorphism", "retro", "modern", "bento",
            "claymorphism", "vibe",
        ],
    ),
    (
        Domain::Color,
        &[
            "color", "colors", "colour", "palette", "palettes", "hex", "rgb", "hue", "shade",
            "tint", "gradient",
        ],
    ),
    (
        Domain::Typography,
        &[
            "font", "fonts", "typography", "typeface", "serif", "sans", "heading", "headings",
            "pairing", "monospace",
        ],
    ),
    (
        Domain::Ux,
        &[
            "ux", "usability", "accessibility", "a11y", "wcag", "animation", "interaction",
            "navigation", "form", "forms", "feedback", "loading", "touch", "gesture",
        ],
    ),
    (
        Domain::Chart,
        &[
            "chart", "charts", "graph", "visualization", "visualisation", "plot", "pie",
            "histogram", "scatter", "heatmap", "sparkline", "trend",
        ],
    ),
    (
        Domain::Landing,
        &[
            "landing", "hero", "cta", "conversion", "signup", "waitlist", "testimonial",
            "testimonials", "pricing", "funnel",
        ],
    ),
    (
        Domain::Product,
        &[
            "saas", "ecommerce", "fintech", "banking", "healthcare", "marketplace", "startup",
            "portfolio", "education", "crypto", "product", "app",
        ],
    ),
    (
        Domain::Icons,
        &["icon", "icons", "iconography", "svg", "glyph", "lucide", "heroicons", "pictogram"],
    ),
    (
        Domain::React,
        &[
            "react", "hook", "hooks", "usestate", "useeffect", "jsx", "rerender", "memo",
            "suspense", "component",
        ],
    ),
    (
        Domain::Web,
        &[
            "html", "seo", "semantic", "meta", "lighthouse", "responsive", "viewport", "web",
            "performance", "css",
        ],
    ),
];

/// Pick the domain whose keywords best match `query`, restricted to `candidates`.
///
/// Ties go to the domain that comes first in composition order. When nothing matches,
/// falls back to `style` if it is a candidate, otherwise the first candidate. Returns
/// `None` only when `candidates` is empty.
pub fn detect_domain(query: &str, candidates: &[Domain]) -> Option<Domain> {
    let words: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    let mut best: Option<(Domain, usize)> = None;
    for &(domain, keywords) in DOMAIN_KEYWORDS {
        if !candidates.contains(&domain) {
            continue;
        }
        let hits = words
            .iter()
            .filter(|w| keywords.contains(&w.as_str()))
            .count();
        if hits > 0 && best.is_none_or(|(_, h)| hits > h) {
            best = Some((domain, hits));
        }
    }

    if let Some((domain, hits)) = best {
        tracing::debug!("Detected domain '{}' for '{}' ({} keyword hits)", domain, query, hits);
        return Some(domain);
    }

    if candidates.contains(&Domain::Style) {
        Some(Domain::Style)
    } else {
        candidates.iter().min().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("calm blue palette", Domain::Color)]
    #[case("serif heading font pairing", Domain::Typography)]
    #[case("revenue bar chart with trend", Domain::Chart)]
    #[case("hero section with CTA", Domain::Landing)]
    #[case("fintech banking app", Domain::Product)]
    #[case("useEffect cleanup in React", Domain::React)]
    #[case("SEO meta tags", Domain::Web)]
    #[case("accessible form feedback", Domain::Ux)]
    #[case("lucide icons", Domain::Icons)]
    #[case("glassmorphism", Domain::Style)]
    fn test_detect_domain(#[case] query: &str, #[case] expected: Domain) {
        check!(detect_domain(query, &Domain::ALL) == Some(expected));
    }

    #[test]
    fn test_no_keywords_falls_back_to_style() {
        check!(detect_domain("something entirely different", &Domain::ALL) == Some(Domain::Style));
    }

    #[test]
    fn test_ties_prefer_composition_order() {
        // one color hit, one chart hit
        check!(detect_domain("palette chart", &Domain::ALL) == Some(Domain::Color));
    }

    #[test]
    fn test_respects_candidates() {
        let candidates = [Domain::Chart, Domain::Web];
        check!(detect_domain("blue palette", &candidates) == Some(Domain::Chart));
        check!(detect_domain("html seo", &candidates) == Some(Domain::Web));
        check!(detect_domain("anything", &[]).is_none());
    }
}
