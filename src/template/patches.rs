//! Compatibility patches for malformed game templates.
//!
//! A few entity files shipped with the game do not survive strict XML
//! parsing (duplicated attribute declarations). Each known offender gets an
//! exact substring replacement keyed by its template path, applied to the
//! raw text before parsing. This is a finite exception list: new malformed
//! files get new entries, nothing is inferred.

pub struct TemplatePatch {
    pub template_path: &'static str,
    pub find: &'static str,
    pub replace: &'static str,
}

pub const PATCHES: &[TemplatePatch] = &[
    TemplatePatch {
        template_path: "data/entities/animals/worm_big.xml",
        find: "next_rect_animation=\"eat\" \r\n\t\tnext_rect_animation=\"\"",
        replace: "next_rect_animation=\"eat\"",
    },
    TemplatePatch {
        template_path: "data/entities/animals/fireskull.xml",
        find: "count_min=\"5\"\r\n    count_max=\"5\"",
        replace: "",
    },
];

/// Apply every patch registered for `template_path` to `content`.
pub fn apply_patches(template_path: &str, mut content: String) -> String {
    for patch in PATCHES {
        if patch.template_path == template_path {
            content = content.replace(patch.find, patch.replace);
        }
    }
    content
}
