#![allow(dead_code)]

use lltq_engine::{ChoiceLog, ContentPack, PrologueContent, generate_plan};

pub const FINAL_WEEK: u8 = 40;

pub fn random_plan<P: ContentPack>(pack: &P, seed: u64) -> ChoiceLog {
    generate_plan(pack, FINAL_WEEK, seed)
}

pub fn prologue_plan(seed: u64) -> ChoiceLog {
    random_plan(&PrologueContent, seed)
}
