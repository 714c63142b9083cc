//! Structural edits applied to converted documents
//!
//! The converter gives editable elements fixed IDs (`sd_txta_Heading`,
//! `sd_btn_Click-Through-URL`, ...). An [`EditEvent`] names a [`Role`], is
//! lowered to [`Mutation`]s, and applied to a freshly parsed document which is
//! then serialized again with a literal doctype.

use std::fmt;
use std::str::FromStr;

use kuchiki::NodeRef;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::{AdBundleError, Result, request};
use crate::rewrite::dom;

/// Class that fades an element in
pub const ANIMATION_CLASS: &str = "animate_fadeIn";

/// Class put on the parent of an animated element
pub const PARENT_ANIMATION_CLASS: &str = "animate_fadeOut";

/// Prefix shared by all delay classes (`delay_0s` .. `delay_5s`)
pub const DELAY_CLASS_PREFIX: &str = "delay_";

/// Longest selectable delay, in seconds
pub const MAX_DELAY_SECS: u8 = 5;

/// Custom font stylesheets are served from here
pub const FONT_LINK_PREFIX: &str = "https://fonts.googleapis.com/css2";

/// Family names keep letters and digits; spaces become `+`
const FAMILY: &AsciiSet = &NON_ALPHANUMERIC.remove(b' ').remove(b'-');

/// A named editable element produced by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Heading,
    SubHeading(u8),
    Offer,
    Cta,
    Logo,
    Background,
}

impl Role {
    /// The element ID the converter gives this role
    pub fn element_id(self) -> String {
        match self {
            Role::Heading => "sd_txta_Heading".to_string(),
            Role::SubHeading(n) => format!("sd_txta_Sub-Heading-{n}"),
            Role::Offer => "sd_txta_Offer-text".to_string(),
            Role::Cta => "sd_btn_Click-Through-URL".to_string(),
            Role::Logo => "sd_img_Logo".to_string(),
            Role::Background => "sd_bgcolor_Main-Background".to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Heading => write!(f, "heading"),
            Role::SubHeading(n) => write!(f, "sub-heading-{n}"),
            Role::Offer => write!(f, "offer"),
            Role::Cta => write!(f, "cta"),
            Role::Logo => write!(f, "logo"),
            Role::Background => write!(f, "background"),
        }
    }
}

impl FromStr for Role {
    type Err = AdBundleError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let role = match lower.as_str() {
            "heading" => Role::Heading,
            "offer" | "offer-text" => Role::Offer,
            "cta" | "click-through-url" => Role::Cta,
            "logo" => Role::Logo,
            "background" | "main-background" => Role::Background,
            other => {
                let n = other
                    .strip_prefix("sub-heading-")
                    .or_else(|| other.strip_prefix("subheading-"))
                    .and_then(|n| n.parse::<u8>().ok())
                    .ok_or_else(|| {
                        request::invalid_edit(format!(
                            "unknown role '{s}' (expected heading, sub-heading-N, offer, cta, logo or background)"
                        ))
                    })?;
                Role::SubHeading(n)
            }
        };
        Ok(role)
    }
}

/// Animation delay in whole seconds, `0..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Delay(u8);

impl Delay {
    pub fn new(seconds: u8) -> Result<Self> {
        if seconds > MAX_DELAY_SECS {
            return Err(request::invalid_edit(format!(
                "delay must be between 0 and {MAX_DELAY_SECS} seconds, got {seconds}"
            )));
        }
        Ok(Self(seconds))
    }

    pub fn seconds(self) -> u8 {
        self.0
    }

    pub fn class(self) -> String {
        format!("{DELAY_CLASS_PREFIX}{}s", self.0)
    }
}

/// One control change in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// Toggle the fade-in animation on a role's element. When enabling with a
    /// delay, the element's parent also gets the parent animation class and
    /// exactly one delay class. Disabling clears both.
    Animate {
        role: Role,
        enabled: bool,
        parent_delay: Option<Delay>,
    },
    /// Swap the custom font stylesheet, or remove it with `None`
    Font { family: Option<String> },
}

/// Which element a mutation touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Element(String),
    ParentOf(String),
}

/// A single tree mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    AddClass { target: Target, class: String },
    RemoveClass { target: Target, class: String },
    RemoveClassPrefix { target: Target, prefix: String },
    SetFontLink { href: Option<String> },
}

impl EditEvent {
    pub fn mutations(&self) -> Result<Vec<Mutation>> {
        match self {
            EditEvent::Animate {
                role,
                enabled,
                parent_delay,
            } => Ok(animate_mutations(&role.element_id(), *enabled, *parent_delay)),
            EditEvent::Font { family } => {
                let href = family.as_deref().map(font_href).transpose()?;
                Ok(vec![Mutation::SetFontLink { href }])
            }
        }
    }
}

fn animate_mutations(id: &str, enabled: bool, parent_delay: Option<Delay>) -> Vec<Mutation> {
    let element = Target::Element(id.to_string());
    let parent = Target::ParentOf(id.to_string());

    if !enabled {
        return vec![
            Mutation::RemoveClass {
                target: element,
                class: ANIMATION_CLASS.to_string(),
            },
            Mutation::RemoveClass {
                target: parent.clone(),
                class: PARENT_ANIMATION_CLASS.to_string(),
            },
            Mutation::RemoveClassPrefix {
                target: parent,
                prefix: DELAY_CLASS_PREFIX.to_string(),
            },
        ];
    }

    let mut mutations = vec![Mutation::AddClass {
        target: element,
        class: ANIMATION_CLASS.to_string(),
    }];
    if let Some(delay) = parent_delay {
        mutations.extend([
            Mutation::AddClass {
                target: parent.clone(),
                class: PARENT_ANIMATION_CLASS.to_string(),
            },
            Mutation::RemoveClassPrefix {
                target: parent.clone(),
                prefix: DELAY_CLASS_PREFIX.to_string(),
            },
            Mutation::AddClass {
                target: parent,
                class: delay.class(),
            },
        ]);
    }
    mutations
}

/// Stylesheet URL for a font family
pub fn font_href(family: &str) -> Result<String> {
    let family = family.trim();
    if family.is_empty() {
        return Err(request::invalid_edit("font family must not be empty"));
    }
    let encoded = utf8_percent_encode(family, FAMILY)
        .to_string()
        .replace(' ', "+");
    Ok(format!("{FONT_LINK_PREFIX}?family={encoded}&display=swap"))
}

/// Document after an edit, plus element IDs that were not found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edited {
    pub html: String,
    pub missing: Vec<String>,
}

/// Apply an edit to `html`: parse, mutate, serialize with doctype
pub fn apply_event(html: &str, event: &EditEvent) -> Result<Edited> {
    let mutations = event.mutations()?;
    Ok(apply_mutations(html, &mutations))
}

pub fn apply_mutations(html: &str, mutations: &[Mutation]) -> Edited {
    let document = dom::parse(html);
    let mut missing: Vec<String> = Vec::new();

    for mutation in mutations {
        let result = match mutation {
            Mutation::AddClass { target, class } => with_target(&document, target, |classes| {
                if !classes.iter().any(|c| c == class) {
                    classes.push(class.clone());
                }
            }),
            Mutation::RemoveClass { target, class } => {
                with_target(&document, target, |classes| classes.retain(|c| c != class))
            }
            Mutation::RemoveClassPrefix { target, prefix } => {
                with_target(&document, target, |classes| {
                    classes.retain(|c| !c.starts_with(prefix.as_str()));
                })
            }
            Mutation::SetFontLink { href } => {
                set_font_link(&document, href.as_deref());
                Ok(())
            }
        };
        if let Err(id) = result {
            if !missing.contains(&id) {
                missing.push(id);
            }
        }
    }

    Edited {
        html: dom::serialize(&document),
        missing,
    }
}

/// Run `edit` on the target's class list; `Err(id)` when the target is absent
fn with_target(
    document: &NodeRef,
    target: &Target,
    edit: impl FnOnce(&mut Vec<String>),
) -> std::result::Result<(), String> {
    let (id, node) = match target {
        Target::Element(id) => (id, dom::element_by_id(document, id).map(|el| el.as_node().clone())),
        Target::ParentOf(id) => (
            id,
            dom::element_by_id(document, id).and_then(|el| el.as_node().parent()),
        ),
    };
    let Some(element) = node.as_ref().and_then(|node| node.as_element()) else {
        return Err(id.clone());
    };

    let mut classes = dom::classes(element);
    edit(&mut classes);
    dom::set_classes(element, &classes);
    Ok(())
}

fn set_font_link(document: &NodeRef, href: Option<&str>) {
    for link in dom::select_all(document, "link[href]") {
        let is_font = dom::attr(&link, "href").is_some_and(|h| h.starts_with(FONT_LINK_PREFIX));
        if is_font {
            link.as_node().detach();
        }
    }

    let Some(href) = href else {
        return;
    };
    let Ok(head) = document.select_first("head") else {
        return;
    };
    if let Some(link) = dom::new_element(r#"<link rel="stylesheet">"#, "link") {
        if let Some(element) = link.as_element() {
            element.attributes.borrow_mut().insert("href", href.to_string());
        }
        head.as_node().append(link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AD: &str = r#"<!DOCTYPE html><html><head>
<link rel="stylesheet" href="./css/style.css">
<link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Roboto&display=swap">
</head><body>
<div id="wrap" class="layer delay_2s">
<p id="sd_txta_Heading" class="text">Big sale</p>
</div>
<a id="sd_btn_Click-Through-URL" href="https://example.com">Go</a>
</body></html>"#;

    fn classes_of(html: &str, id: &str) -> Vec<String> {
        let doc = dom::parse(html);
        dom::element_by_id(&doc, id)
            .map(|el| dom::classes(&el))
            .unwrap_or_default()
    }

    #[test]
    fn test_role_ids() {
        assert_eq!(Role::Heading.element_id(), "sd_txta_Heading");
        assert_eq!(Role::SubHeading(2).element_id(), "sd_txta_Sub-Heading-2");
        assert_eq!(Role::Offer.element_id(), "sd_txta_Offer-text");
        assert_eq!(Role::Cta.element_id(), "sd_btn_Click-Through-URL");
        assert_eq!(Role::Logo.element_id(), "sd_img_Logo");
        assert_eq!(Role::Background.element_id(), "sd_bgcolor_Main-Background");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Heading".parse::<Role>().unwrap(), Role::Heading);
        assert_eq!("sub-heading-3".parse::<Role>().unwrap(), Role::SubHeading(3));
        assert_eq!("cta".parse::<Role>().unwrap(), Role::Cta);
        assert!("footer".parse::<Role>().is_err());
        assert!("sub-heading-x".parse::<Role>().is_err());
    }

    #[test]
    fn test_delay_bounds() {
        assert_eq!(Delay::new(0).unwrap().class(), "delay_0s");
        assert_eq!(Delay::new(5).unwrap().class(), "delay_5s");
        assert!(Delay::new(6).is_err());
    }

    #[test]
    fn test_enable_animation_with_parent_delay() {
        let event = EditEvent::Animate {
            role: Role::Heading,
            enabled: true,
            parent_delay: Some(Delay::new(3).unwrap()),
        };
        let edited = apply_event(AD, &event).unwrap();
        assert!(edited.missing.is_empty());
        assert!(edited.html.starts_with("<!DOCTYPE html>"));
        assert_eq!(classes_of(&edited.html, "sd_txta_Heading"), ["text", "animate_fadeIn"]);
        assert_eq!(classes_of(&edited.html, "wrap"), ["layer", "animate_fadeOut", "delay_3s"]);
    }

    #[test]
    fn test_enable_twice_keeps_single_classes() {
        let event = EditEvent::Animate {
            role: Role::Heading,
            enabled: true,
            parent_delay: Some(Delay::new(1).unwrap()),
        };
        let once = apply_event(AD, &event).unwrap().html;
        let twice = apply_event(&once, &event).unwrap().html;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_disable_animation_clears_parent() {
        let enable = EditEvent::Animate {
            role: Role::Heading,
            enabled: true,
            parent_delay: Some(Delay::new(4).unwrap()),
        };
        let disable = EditEvent::Animate {
            role: Role::Heading,
            enabled: false,
            parent_delay: None,
        };
        let html = apply_event(AD, &enable).unwrap().html;
        let html = apply_event(&html, &disable).unwrap().html;
        assert_eq!(classes_of(&html, "sd_txta_Heading"), ["text"]);
        assert_eq!(classes_of(&html, "wrap"), ["layer"]);
    }

    #[test]
    fn test_missing_role_element_is_reported() {
        let event = EditEvent::Animate {
            role: Role::Logo,
            enabled: true,
            parent_delay: Some(Delay::new(0).unwrap()),
        };
        let edited = apply_event(AD, &event).unwrap();
        assert_eq!(edited.missing, ["sd_img_Logo"]);
    }

    #[test]
    fn test_parent_target_must_be_an_element() {
        let html = r#"<!DOCTYPE html><html id="root"><body><p id="child"></p></body></html>"#;
        let edited = apply_mutations(
            html,
            &[
                Mutation::AddClass {
                    target: Target::ParentOf("root".to_string()),
                    class: PARENT_ANIMATION_CLASS.to_string(),
                },
                Mutation::AddClass {
                    target: Target::ParentOf("child".to_string()),
                    class: PARENT_ANIMATION_CLASS.to_string(),
                },
            ],
        );
        assert_eq!(edited.missing, ["root"]);
        assert_eq!(
            dom::classes(&dom::select_all(&dom::parse(&edited.html), "body")[0]),
            ["animate_fadeOut"]
        );
    }

    #[test]
    fn test_font_swap_replaces_link() {
        let event = EditEvent::Font {
            family: Some("Open Sans".to_string()),
        };
        let edited = apply_event(AD, &event).unwrap();
        assert!(!edited.html.contains("family=Roboto"));
        assert!(edited.html.contains("fonts.googleapis.com/css2?family=Open+Sans&amp;display=swap"));
        assert!(edited.html.contains(r#"href="./css/style.css""#));
    }

    #[test]
    fn test_font_removal() {
        let edited = apply_event(AD, &EditEvent::Font { family: None }).unwrap();
        assert!(!edited.html.contains("fonts.googleapis.com"));
    }

    #[test]
    fn test_font_href_rejects_empty() {
        assert!(font_href("  ").is_err());
        assert_eq!(
            font_href("Roboto").unwrap(),
            "https://fonts.googleapis.com/css2?family=Roboto&display=swap"
        );
    }
}
