//! Static category taxonomy and the keyword table search uses to pick
//! categories for a free-text query.

use crate::models::Category;

/// (id, name, slug, path under the base URL, icon)
const CATEGORIES: &[(&str, &str, &str, &str, &str)] = &[
    ("100799", "Anchoring & Docking", "anchoring-docking", "100799-anchoring-docking", "⚓"),
    ("100392", "Electrics & Lighting", "electrics-lighting", "100392-electricslighting", "💡"),
    ("190", "Electronics", "electronics", "190-electronics", "📡"),
    ("100396", "Fitting", "fitting", "100396-fitting", "🔧"),
    ("197", "Life on Board", "life-on-board", "197-life-on-board", "🚢"),
    ("100669", "Maintenance", "maintenance-cleaning", "100669-maintenance-cleaning-products", "🧹"),
    ("100393", "Motor", "motor", "100393-motor", "⚙️"),
    ("100329", "Navigation", "navigation", "100329-navigation", "🧭"),
    ("100390", "Painting", "painting", "100390-painting", "🎨"),
    ("100713", "Plumbing", "plumbing", "100713-plumbing", "🔩"),
    ("100395", "Ropes", "ropes", "100395-ropes", "🪢"),
    ("100389", "Safety", "safety", "100389-safety", "🦺"),
    ("100394", "Screws", "screws", "100394-screws", "🔩"),
    ("100391", "Tools & Machines", "tools-machines", "100391-tools-machines", "🛠️"),
    ("43", "Clothing & Gear", "personal-equipment", "43-personal-equipment", "👕"),
    ("100911", "Inflatables & Toys", "inflatables", "100911-inflatablewater-toys", "🏖️"),
];

/// Category slug to search keywords, in match priority order.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("anchoring-docking", &["anchor", "dock", "fender", "mooring", "cleat", "chain", "shackle"]),
    (
        "electrics-lighting",
        &["light", "led", "lamp", "wire", "cable", "electric", "bulb", "switch", "battery"],
    ),
    (
        "electronics",
        &["gps", "radar", "chart", "plotter", "vhf", "radio", "instrument", "display", "sensor"],
    ),
    ("fitting", &["fitting", "hinge", "latch", "handle", "rail", "stanchion", "pulpit"]),
    (
        "life-on-board",
        &["galley", "kitchen", "cabin", "cushion", "mattress", "table", "chair", "grill"],
    ),
    (
        "maintenance-cleaning",
        &["clean", "polish", "wax", "wash", "soap", "teak", "oil", "grease", "degreaser"],
    ),
    (
        "motor",
        &["motor", "engine", "propeller", "impeller", "fuel", "filter", "oil", "outboard"],
    ),
    ("navigation", &["compass", "binocular", "flag", "chart", "map", "navigation"]),
    (
        "painting",
        &[
            "paint", "antifouling", "primer", "varnish", "brush", "roller", "epoxy", "gelcoat",
            "awlgrip",
        ],
    ),
    (
        "plumbing",
        &["pump", "hose", "valve", "pipe", "fitting", "water", "toilet", "plumbing"],
    ),
    ("ropes", &["rope", "line", "cord", "braid", "splice", "halyard", "sheet"]),
    (
        "safety",
        &[
            "lifejacket", "life jacket", "flare", "fire", "extinguisher", "safety", "harness",
            "buoy", "raft",
        ],
    ),
    ("screws", &["screw", "bolt", "nut", "washer", "rivet", "stainless"]),
    (
        "tools-machines",
        &["tool", "drill", "saw", "wrench", "screwdriver", "sander", "festool", "machine"],
    ),
    (
        "personal-equipment",
        &["clothing", "shoe", "boot", "jacket", "glove", "hat", "sunglasses", "gear"],
    ),
    ("inflatables", &["inflatable", "dinghy", "kayak", "paddleboard", "toy", "tube"]),
];

/// Full catalog with URLs rooted at `base_url`.
pub fn categories(base_url: &str) -> Vec<Category> {
    let base = base_url.trim_end_matches('/');
    CATEGORIES
        .iter()
        .map(|&(id, name, slug, path, icon)| Category {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            url: format!("{base}/{path}"),
            icon: icon.to_string(),
        })
        .collect()
}

pub fn find_by_slug(base_url: &str, slug: &str) -> Option<Category> {
    categories(base_url).into_iter().find(|c| c.slug == slug)
}

/// Slugs whose keywords relate to `query`, in table order.
///
/// A keyword relates when it occurs in the query or the query occurs in it.
pub fn matching_slugs(query: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            keywords
                .iter()
                .any(|kw| query.contains(kw) || kw.contains(query.as_str()))
        })
        .map(|&(slug, _)| slug)
        .collect()
}
