//! Player inventory flags and story progress.

/// What the player carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStatus {
    pub has_cosmoguide: bool,
    pub has_bubble_on: bool,
}

impl PlayerStatus {
    pub fn give_cosmoguide(&mut self) {
        self.has_cosmoguide = true;
        log::info!("Player received the CosmoGuide");
    }

    pub fn wear_bubble(&mut self) {
        self.has_bubble_on = true;
        log::debug!("Player is wearing a bubble");
    }

    /// Burst the worn bubble. Returns whether there was one.
    pub fn pop_bubble(&mut self) -> bool {
        let had_bubble = std::mem::replace(&mut self.has_bubble_on, false);
        if had_bubble {
            log::info!("Player's bubble popped");
        }
        had_bubble
    }
}

/// Story flags that change what NPCs say.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NpcEvents {
    pub isador_puzzle_piece_found: bool,
    /// Bumped whenever NPC dialogue pages must be rebuilt.
    pub pages_revision: u32,
}

impl NpcEvents {
    pub fn update_npc_pages(&mut self) {
        self.pages_revision += 1;
        log::debug!("NPC pages now at revision {}", self.pages_revision);
    }
}
