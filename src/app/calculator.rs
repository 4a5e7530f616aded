use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufRead};

use crate::error;
use crate::hand::decompose_and_score;
use crate::model::*;
use crate::util::common::*;

// 式を受け取って役と点数を計算するアプリケーション
#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
        }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => self.detail = true,
                "-f" => file_path = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        if (file_path.is_empty() && exp.is_empty()) || (!file_path.is_empty() && !exp.is_empty()) {
            print_usage();
            return;
        }

        if !exp.is_empty() {
            if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
                return;
            }
        }

        if !file_path.is_empty() {
            if let Err(e) = self.run_from_file(&file_path) {
                error!("{}", e);
            }
        }
    }

    fn run_from_file(&self, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines.map_while(Result::ok) {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> Res {
        let mut calculator = Calculator::new(self.detail);
        calculator.parse(exp)?;
        calculator.run();
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

#[derive(Debug)]
struct Calculator {
    detail: bool,
    // decompose_and_score params
    hand: TileTable,
    melds: Vec<Meld>,
    winning_tile: Tile,
    status: HandStatus,
    round: RoundContext,
    config: RuleConfig,
    // score verify
    verify: bool,
    fu: usize,
    fan: usize,
    score: Point,
}

impl Calculator {
    fn new(detail: bool) -> Self {
        Self {
            detail,
            hand: TileTable::default(),
            melds: vec![],
            winning_tile: Z8,
            status: HandStatus {
                tsumo: true,
                ..Default::default()
            },
            round: RoundContext::default(),
            config: RuleConfig::default(),
            verify: false,
            fu: 0,
            fan: 0,
            score: 0,
        }
    }

    // 式の形式: 手牌[,副露..]/場況/役フラグ/検証値
    // 例: m23455p456s789z22,m777+/ES,m1/立直/40,2,2600
    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.replace(' ', "");
        let input = input.split('#').collect::<Vec<&str>>()[0]; // コメント削除
        let exps: Vec<&str> = input.split('/').collect();
        let len = exps.len();
        if len > 1 {
            self.parse_stage_info(exps[1])?;
        }
        if len > 0 {
            self.parse_hand_meld(exps[0])?;
        }
        if len > 2 {
            self.parse_flags(exps[2])?;
        }
        if len > 3 {
            self.parse_score_verify(exps[3])?;
        }

        if self.detail {
            println!("{:?}", self);
        }

        Ok(())
    }

    fn run(&self) -> Verify {
        let info = decompose_and_score(
            &self.hand,
            &self.melds,
            self.winning_tile,
            &self.status,
            &self.round,
            &self.config,
        );
        if self.detail {
            println!("{:?}", info);
        }

        if info.yakus.is_empty() {
            println!("not win hand or no yaku");
            let verify = if self.verify {
                if self.score == 0 {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            } else {
                Verify::Skip
            };
            println!("verify: {:?}", verify);
            return verify;
        }

        let mut yakus = "".to_string();
        for y in &info.yakus {
            let _ = write!(yakus, "{}({}), ", y.name, y.fan);
        }
        println!("yakus: {}", yakus);

        let score = info.total_points(
            self.round.is_dealer(),
            self.status.tsumo,
            self.round.players,
        );
        println!(
            "fu: {}, fan: {}, yakuman: {}, score: {}, {}",
            info.fu, info.total_fan, info.yakuman_times, score, info.title
        );

        let verify = if self.verify {
            let fan_fu_ok = info.yakuman_times > 0 // 役満以上は得点のみをチェック
                || (info.fu == self.fu && info.total_fan == self.fan);
            if fan_fu_ok && score == self.score {
                Verify::Ok
            } else {
                Verify::Error
            }
        } else {
            Verify::Skip
        };
        println!("verify: {:?}", verify);
        verify
    }

    // 場況: 場風自風[プレイヤー数][,ドラ表示牌[,裏ドラ表示牌]] 例: ES3,m1,p3
    fn parse_stage_info(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        let len = exps.len();
        if len > 0 && !exps[0].is_empty() {
            let chars: Vec<char> = exps[0].chars().collect();
            if chars.len() < 2 {
                Err(format!("stage info too short: {}", exps[0]))?;
            }
            self.round.prevalent_wind = wind_from_char(chars[0])?;
            self.round.seat_wind = wind_from_char(chars[1])?;
            if chars.len() > 2 {
                self.round.players = match chars[2] {
                    '3' => 3,
                    '4' => 4,
                    c => Err(format!("invalid player count: {}", c))?,
                };
            }
        }
        if len > 1 {
            self.round.doras = tiles_from_string(exps[1])?;
        }
        if len > 2 {
            self.round.ura_doras = tiles_from_string(exps[2])?;
        }
        Ok(())
    }

    fn parse_hand_meld(&mut self, input: &str) -> Res {
        let mut exp_hand = "".to_string();
        let mut exp_melds = vec![];
        for exp in input.split(',') {
            if exp_hand.is_empty() {
                if exp.ends_with('+') {
                    self.status.tsumo = false; // 末尾の'+'はロン和了
                }
                exp_hand = exp.replace('+', "");
            } else {
                exp_melds.push(exp.to_string());
            }
        }

        // 最後に記載した牌が和了牌 手牌には含めない
        let tiles = tiles_from_string(&exp_hand)?;
        let winning_tile = match tiles.last() {
            Some(&t) => t,
            None => Err("empty hand".to_string())?,
        };
        for &t in &tiles[..tiles.len() - 1] {
            inc_tile(&mut self.hand, t);
        }
        self.winning_tile = winning_tile;

        for exp_meld in &exp_melds {
            self.melds.push(meld_from_string(exp_meld)?);
        }

        Ok(())
    }

    // 状況役および特殊ルールのフラグ
    fn parse_flags(&mut self, input: &str) -> Res {
        for f in input.split(',') {
            match f {
                "立直" => self.status.riichi = true,
                "両立直" => self.status.double_riichi = true,
                "一発" => self.status.ippatsu = true,
                "海底摸月" => self.status.haitei = true,
                "河底撈魚" => self.status.houtei = true,
                "嶺上開花" => self.status.rinshan = true,
                "槍槓" => self.status.chankan = true,
                "天和" => self.status.tenhou = true,
                "地和" => self.status.chiihou = true,
                "青天井" => self.config.uncapped = true,
                "固定" => self.config.fixed_table = true,
                "" => {}
                _ => {
                    if let Some(n) = f.strip_prefix("北") {
                        self.round.n_bei_dora = n.parse::<usize>().map_err(|e| e.to_string())?;
                    } else {
                        Err(format!("invalid flag: {}", f))?
                    }
                }
            }
        }
        Ok(())
    }

    fn parse_score_verify(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        if exps.len() != 3 {
            Err(format!("invalid score verify info: {}", input))?;
        }
        self.fu = exps[0].parse::<usize>()?;
        self.fan = exps[1].parse::<usize>()?;
        self.score = exps[2].parse::<Point>()?;
        self.verify = true;
        Ok(())
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run EXPRESSION [-d]
    $ cargo run -f FILE [-d]
Options
    -d: print debug info
    -f: read expressions from file instead of a commandline expression
"
    );
}

#[test]
fn test_calculator() {
    let file = File::open("tests/win_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.replace(' ', "");
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut calculator = Calculator::new(false);
            calculator.parse(&e).unwrap();
            assert_ne!(Verify::Error, calculator.run(), "{}", exp);
        }
    }
}
