//! Label and project references.
//!
//! `@name` and `#name` refer to a label or project; names with spaces are
//! written `@(two words)` / `#(Two Words)`, and a project may carry a section
//! as `#Project/Section` or `#(Two Words)/Section`. Unknown references turn
//! into suggestion menus.

use tracing::debug;

use super::tokenizer::matching_paren;
use super::types::{nfc, AutocompleteItem, Icon, InputContext, ItemVariables};

/// Which kind of entity a token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    /// `@label`
    Label,
    /// `#project`
    Project,
}

impl Sigil {
    /// The leading character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Label => '@',
            Self::Project => '#',
        }
    }

    /// Detect the sigil a token starts with.
    #[must_use]
    pub fn of(token: &str) -> Option<Self> {
        match token.chars().next()? {
            '@' => Some(Self::Label),
            '#' => Some(Self::Project),
            _ => None,
        }
    }

    const fn icon(self) -> Icon {
        match self {
            Self::Label => Icon::Label,
            Self::Project => Icon::Project,
        }
    }
}

/// Turn `@(two words)` into `@two words`.
///
/// Only names containing a space are unwrapped, so `@(x)` stays as typed.
/// A trailing `/Section` after the matching paren is kept, and parens nested
/// inside the name survive: `@(a (b) c)` becomes `@a (b) c`.
#[must_use]
pub fn unwrap_parens(token: &str) -> String {
    let Some(sigil) = Sigil::of(token) else {
        return token.to_string();
    };
    let body = &token[1..];
    let Some(close) = matching_paren(body) else {
        return token.to_string();
    };

    let inner = &body[1..close];
    let tail = &body[close + 1..];
    if !inner.contains(' ') || !(tail.is_empty() || tail.starts_with('/')) {
        return token.to_string();
    }
    format!("{}{}{tail}", sigil.as_char(), inner.trim())
}

/// Canonical written form of a sigil-prefixed name.
///
/// `@two words` becomes `@(two words)`; `#Two Words/Calls` becomes
/// `#(Two Words)/Calls`; names without spaces are left alone.
#[must_use]
pub fn wrap_name(name: &str) -> String {
    let Some(sigil) = Sigil::of(name) else {
        return name.to_string();
    };
    let bare = &name[1..];
    if !bare.contains(' ') {
        return name.to_string();
    }

    let mark = sigil.as_char();
    if let Some((project, section)) = bare.split_once('/') {
        if !section.contains(' ') && !section.is_empty() {
            return format!("{mark}({project})/{section}");
        }
    }
    format!("{mark}({bare})")
}

/// Known names containing the typed fragment, case-insensitively.
///
/// With `partial_match` the sigil is ignored so the fragment may match
/// anywhere in a name; without it the fragment must match including the
/// sigil, which anchors it at the start of the name.
#[must_use]
pub fn filter_candidates<'a, I>(known: I, fragment: &str, partial_match: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let lowered = fragment.to_lowercase();
    let needle = if partial_match {
        lowered.chars().skip(1).collect::<String>()
    } else {
        lowered
    };
    known
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Where an unknown reference sits in the input, for rebuilding args.
#[derive(Debug, Clone, Copy)]
pub struct TokenSite<'a> {
    /// The untouched input.
    pub raw_input: &'a str,
    /// Byte offset of the token in `raw_input`.
    pub start: usize,
    /// End of the token in `raw_input`.
    pub end: usize,
}

impl TokenSite<'_> {
    /// The input with this token replaced by `replacement`.
    ///
    /// Everything else, the `{deadline}` block included, stays where it was typed.
    fn replaced_with(&self, replacement: &str) -> String {
        let arg = format!(
            "{}{replacement}{}",
            &self.raw_input[..self.start],
            &self.raw_input[self.end..]
        );
        format!("{} ", arg.trim_end())
    }
}

/// Build the menu for a reference that did not match exactly.
///
/// `entity` is the sigil-prefixed, unwrapped name the user typed.
#[must_use]
pub fn suggest(
    entity: &str,
    sigil: Sigil,
    site: &TokenSite<'_>,
    ctx: &InputContext,
) -> Vec<AutocompleteItem> {
    let entity = nfc(entity);
    let known = match sigil {
        Sigil::Label => &ctx.all_labels,
        Sigil::Project => &ctx.all_projects,
    };
    let count = |name: &str| match sigil {
        Sigil::Label => ctx.label_count(name),
        Sigil::Project => ctx.project_count(name),
    };

    let mut candidates = filter_candidates(known, &entity, ctx.partial_match);
    candidates.sort_by(|a, b| {
        count(b.as_str())
            .cmp(&count(a.as_str()))
            .then_with(|| a.cmp(b))
    });
    debug!(entity = %entity, candidates = candidates.len(), "reference not found");

    if candidates.is_empty() {
        let bare: String = entity.chars().skip(1).collect();
        return match sigil {
            Sigil::Label => vec![AutocompleteItem::new(
                format!("no labels matching, create a new label named '{bare}'?"),
                format!("{} ", site.raw_input),
                Icon::NewLabel,
            )
            .with_subtitle("press Enter to create a new label")
            .with_variables(ItemVariables::CreateLabel { name: bare })],
            Sigil::Project => vec![AutocompleteItem::notice(
                "no projects matching",
                "try another query?",
                Icon::Warning,
            )],
        };
    }

    candidates
        .into_iter()
        .map(|name| {
            let arg = site.replaced_with(&wrap_name(&name));
            AutocompleteItem::new(
                format!("{name} ({})", count(name.as_str())),
                arg.clone(),
                sigil.icon(),
            )
            .with_subtitle(arg)
        })
        .collect()
}
