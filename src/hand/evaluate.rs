use super::parse::*;
use super::yaku::*;
use crate::model::*;
use crate::util::common::*;

// 和了点計算のエントリポイント
// handには和了牌を含まない(内部で追加する) ロン・ツモの区別はstatus.tsumo
// 和了形でない場合および無役の場合は得点0のPointInfoを返却
pub fn decompose_and_score(
    hand: &TileTable,
    melds: &[Meld],
    winning_tile: Tile,
    status: &HandStatus,
    round: &RoundContext,
    config: &RuleConfig,
) -> PointInfo {
    let mut hand = *hand;
    inc_tile(&mut hand, winning_tile);

    let mut decs = decompose_normal(&hand);
    if melds.is_empty() {
        decs.append(&mut decompose_chiitoitsu(&hand));
        decs.append(&mut decompose_kokushi(&hand));
    }

    let meld_blocks = melds_to_blocks(melds);
    let mut ctxs = vec![];
    for mut dec in decs {
        dec.extend(meld_blocks.iter().cloned());
        match dec.len() {
            0 | 5 | 7 => {} // 国士, 通常, 七対子
            _ => continue,  // 無効な和了形
        }
        ctxs.push(YakuContext::new(
            hand,
            dec,
            winning_tile,
            round.prevalent_wind,
            round.seat_wind,
            *status,
        ));
    }

    if ctxs.is_empty() {
        return PointInfo::default(); // 和了形以外
    }

    let n_dora = count_dora(&hand, melds, &round.doras);
    let n_red_dora = count_red_dora(&hand, melds);
    let n_ura_dora = if status.riichi || status.double_riichi {
        count_dora(&hand, melds, &round.ura_doras)
    } else {
        0
    };

    // 和了形に複数の解釈が可能な場合,最も得点の高いものを採用
    let mut best = PointInfo::default();
    for ctx in ctxs {
        let fu = ctx.calc_fu();
        let (yakus, _, _) = ctx.calc_yaku();
        let values: Vec<YakuValue> = yakus
            .iter()
            .map(|y| YakuValue {
                name: y.name.to_string(),
                fan: if y.yakuman > 0 {
                    y.yakuman
                } else if ctx.is_open() {
                    y.fan_open
                } else {
                    y.fan_close
                },
                yakuman: y.yakuman > 0,
            })
            .collect();

        let info = PointInfo::new(
            fu,
            values,
            n_dora,
            n_ura_dora,
            n_red_dora,
            round.n_bei_dora,
            config,
        );
        if info > best {
            best = info;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(
        exp_hand: &str,
        exp_melds: &[&str],
        winning_tile: Tile,
        status: HandStatus,
        round: &RoundContext,
        config: &RuleConfig,
    ) -> PointInfo {
        let tiles = tiles_from_string(exp_hand).unwrap();
        let hand = tiles_to_tile_table(&tiles);
        let melds: Vec<Meld> = exp_melds
            .iter()
            .map(|e| meld_from_string(e).unwrap())
            .collect();
        decompose_and_score(&hand, &melds, winning_tile, &status, round, config)
    }

    fn ron() -> HandStatus {
        HandStatus::default()
    }

    fn tsumo() -> HandStatus {
        HandStatus {
            tsumo: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fan_fu_cases() {
        let round = RoundContext::default();
        let config = RuleConfig::default();

        // 断么九のみ 単騎ロン
        let pi = score("m2334457p444s678", &[], Tile(TM, 7), ron(), &round, &config);
        assert_eq!((pi.total_fan, pi.fu), (1, 40));

        // 断么九のみ 嵌張ロン
        let pi = score("m23344577p456s68", &[], Tile(TS, 7), ron(), &round, &config);
        assert_eq!((pi.total_fan, pi.fu), (1, 40));

        // 一気通貫 単騎ロン
        let pi = score("m123456789p2348", &[], Tile(TP, 8), ron(), &round, &config);
        assert_eq!((pi.total_fan, pi.fu), (2, 40));

        // 食い下がり一気通貫
        let pi = score(
            "m123456789p8",
            &["p2+34"],
            Tile(TP, 8),
            ron(),
            &round,
            &config,
        );
        assert_eq!((pi.total_fan, pi.fu), (1, 30));

        // 平和ロンは30符
        let pi = score("m123567p345s2355", &[], Tile(TS, 4), ron(), &round, &config);
        assert_eq!((pi.total_fan, pi.fu), (1, 30));

        // 平和ツモは20符2翻
        let pi = score(
            "m123567p345s2355",
            &[],
            Tile(TS, 4),
            tsumo(),
            &round,
            &config,
        );
        assert_eq!((pi.total_fan, pi.fu), (2, 20));

        // 一盃口 辺張ロン
        let pi = score("m112233p99s12789", &[], Tile(TS, 3), ron(), &round, &config);
        assert_eq!((pi.total_fan, pi.fu), (1, 40));
    }

    #[test]
    fn test_pick_best_decomposition() {
        let round = RoundContext::default();
        let config = RuleConfig::default();

        // 二盃口+平和(4翻30符)と七対子(2翻25符)では前者を採用
        let pi = score("m12233p44556611", &[], Tile(TM, 1), ron(), &round, &config);
        assert!(pi.yakus.iter().any(|y| y.name == "二盃口"));
        assert!(pi.yakus.iter().any(|y| y.name == "平和"));
        assert_eq!((pi.total_fan, pi.fu), (4, 30));
    }

    #[test]
    fn test_yakuman_suppresses_normal_yaku() {
        let round = RoundContext::default();
        let config = RuleConfig::default();

        // 四暗刻ツモ: 対々和などは出力されない
        let pi = score("m11122p333s44455", &[], Tile(TM, 2), tsumo(), &round, &config);
        assert_eq!(pi.yakuman_times, 1);
        assert_eq!(pi.base_point, YAKUMAN);
        assert!(pi.yakus.iter().all(|y| y.yakuman));

        // 役満の複合 (大四喜 + 字一色 + 四暗刻単騎)
        let pi = score("z1112223334445", &[], Tile(TZ, 5), tsumo(), &round, &config);
        assert_eq!(pi.yakuman_times, 5);
        assert_eq!(pi.base_point, YAKUMAN * 5);
    }

    #[test]
    fn test_no_yaku_and_no_win() {
        let round = RoundContext::default();
        let config = RuleConfig::default();

        // 和了形だが無役 (嵌張ロンのみ)
        let pi = score("m123456p234s3599", &[], Tile(TS, 4), ron(), &round, &config);
        assert_eq!(pi.base_point, 0);
        assert_eq!(pi.total_points(false, false, 4), 0);

        // 和了形ですらない
        let pi = score("m123456789p45s19", &[], Tile(TP, 3), ron(), &round, &config);
        assert_eq!(pi.base_point, 0);
        assert!(pi.yakus.is_empty());
    }

    #[test]
    fn test_dora_counting() {
        let config = RuleConfig::default();
        let round = RoundContext {
            doras: tiles_from_string("m1").unwrap(),
            ura_doras: tiles_from_string("p3").unwrap(),
            ..Default::default()
        };

        // 表示牌m1 → ドラm2が2枚 裏表示牌p3 → 裏ドラp4が1枚 赤5が1枚
        let riichi_tsumo = HandStatus {
            tsumo: true,
            riichi: true,
            ..Default::default()
        };
        let pi = score("m223344p456s4406", &[], Tile(TS, 4), riichi_tsumo, &round, &config);
        assert_eq!(pi.n_dora, 2);
        assert_eq!(pi.n_ura_dora, 1);
        assert_eq!(pi.n_red_dora, 1);

        // 立直なしでは裏ドラは数えない
        let pi = score("m223344p456s4406", &[], Tile(TS, 4), tsumo(), &round, &config);
        assert_eq!(pi.n_ura_dora, 0);
    }

    #[test]
    fn test_bei_dora() {
        let config = RuleConfig::default();
        let round = RoundContext {
            players: 3,
            n_bei_dora: 2,
            ..Default::default()
        };
        let pi = score("m2334457p444s678", &[], Tile(TM, 7), ron(), &round, &config);
        assert_eq!(pi.n_bei_dora, 2);
        assert_eq!(pi.total_fan, 3); // 断么九 + 北ドラ2
    }

    #[test]
    fn test_deterministic_output() {
        use rand::seq::SliceRandom;

        let round = RoundContext::default();
        let config = RuleConfig::default();

        let mut tiles = tiles_from_string("m2334457p444s678").unwrap();
        let hand = tiles_to_tile_table(&tiles);
        let expected = serde_json::to_string(&decompose_and_score(
            &hand,
            &[],
            Tile(TM, 7),
            &ron(),
            &round,
            &config,
        ))
        .unwrap();

        // 入力順序によらず結果は一意
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            tiles.shuffle(&mut rng);
            let hand = tiles_to_tile_table(&tiles);
            let json = serde_json::to_string(&decompose_and_score(
                &hand,
                &[],
                Tile(TM, 7),
                &ron(),
                &round,
                &config,
            ))
            .unwrap();
            assert_eq!(json, expected);
        }
    }
}
