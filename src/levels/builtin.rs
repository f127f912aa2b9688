//! Hand-authored campaign levels.

use crate::core::{Level, LevelError, Pos};

struct Authored {
    name: &'static str,
    rows: &'static [&'static str],
    first: (u16, u16),
    second: (u16, u16),
}

const CAMPAIGN: &[Authored] = &[
    Authored {
        name: "Warm-up",
        rows: &["#######", "#     #", "# . . #", "#     #", "#######"],
        first: (1, 1),
        second: (5, 3),
    },
    Authored {
        name: "Split",
        rows: &["#########", "#   #   #", "# 1   2 #", "#   #   #", "#########"],
        first: (1, 1),
        second: (7, 3),
    },
    Authored {
        name: "Corridor",
        rows: &["########", "#      #", "#.#### #", "#     .#", "########"],
        first: (6, 1),
        second: (1, 1),
    },
    Authored {
        name: "Crossing",
        rows: &[
            "#######",
            "#  #  #",
            "# 1 2 #",
            "#  #  #",
            "# ### #",
            "#     #",
            "#######",
        ],
        first: (1, 5),
        second: (5, 5),
    },
    Authored {
        name: "Pillars",
        rows: &[
            "#########",
            "#   .   #",
            "# # # # #",
            "#       #",
            "# # # # #",
            "#   .   #",
            "#########",
        ],
        first: (1, 3),
        second: (7, 3),
    },
];

/// Parse the campaign levels in play order.
pub fn campaign() -> Result<Vec<Level>, LevelError> {
    CAMPAIGN
        .iter()
        .map(|a| {
            Level::parse(
                a.name,
                a.rows,
                Pos::new(a.first.0, a.first.1),
                Pos::new(a.second.0, a.second.1),
            )
        })
        .collect()
}
