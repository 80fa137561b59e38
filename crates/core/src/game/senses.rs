use super::*;

impl Game {
    pub fn senses_at(&self, pos: Pos) -> Senses {
        self.scent.senses(pos, &self.state.pits, self.state.wumpus, self.state.gold)
    }

    pub fn player_senses(&self) -> Senses {
        self.senses_at(self.state.player)
    }
}
