//! Roster parsing throughput: HTML table discovery and row extraction

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use squad_scraper::domain::PlayerRole;
use squad_scraper::infrastructure::parsing::{RosterTableReader, classify, extract, split};

fn goalkeeper_row(index: usize) -> String {
    format!(
        "<tr><td>{index} Goleiro Numero {index}</td><td>G</td><td>28</td><td>1.90 m</td>\
         <td>85 kg</td><td>Brasil</td><td>20</td><td>1</td><td>15</td><td>12</td><td>0</td>\
         <td>2</td><td>3</td><td>1</td><td>0</td></tr>"
    )
}

fn field_player_row(index: usize) -> String {
    format!(
        "<tr><td>Jogador Numero ({index})</td><td>M</td><td>24</td><td>1.78 m</td><td>72 kg</td>\
         <td>Brasil</td><td>30</td><td>5</td><td>11</td><td>4</td><td>40</td><td>18</td>\
         <td>25</td><td>30</td><td>6</td><td>1</td></tr>"
    )
}

fn squad_page(goalkeepers: usize, field_players: usize) -> String {
    let keeper_rows: String = (1..=goalkeepers).map(goalkeeper_row).collect();
    let player_rows: String = (1..=field_players).map(field_player_row).collect();
    format!(
        "<html><body>\
         <table><thead><tr><th>NOME</th><th>POS</th><th>IDADE</th><th>ALT</th><th>P</th>\
         <th>NAC</th><th>J</th><th>SUB</th><th>D</th><th>GS</th><th>A</th><th>FC</th><th>FS</th>\
         <th>CA</th><th>CV</th></tr></thead><tbody>{keeper_rows}</tbody></table>\
         <table><thead><tr><th>NOME</th><th>POS</th><th>IDADE</th><th>ALT</th><th>P</th>\
         <th>NAC</th><th>J</th><th>SUB</th><th>G</th><th>A</th><th>TC</th><th>CG</th><th>FC</th>\
         <th>FS</th><th>CA</th><th>CV</th></tr></thead><tbody>{player_rows}</tbody></table>\
         </body></html>"
    )
}

fn parse_and_extract(reader: &RosterTableReader, page: &str) -> usize {
    let mut extracted = 0;
    for table in reader.read_document(page) {
        let Some(role) = classify(&table.header, table.first_row()) else {
            continue;
        };
        extracted += table
            .rows
            .iter()
            .filter(|cells| extract(cells, role).is_ok())
            .count();
    }
    extracted
}

fn extraction_benchmark(c: &mut Criterion) {
    let reader = RosterTableReader::new().unwrap();
    let page = squad_page(4, 30);

    c.bench_function("squad page - parse, classify, extract (34 rows)", |b| {
        b.iter(|| parse_and_extract(&reader, black_box(&page)));
    });

    let cells: Vec<String> = [
        "10 João Silva", "G", "28", "1.90 m", "85 kg", "Brasil", "20", "1", "15", "12", "0", "2",
        "3", "1", "0",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();
    c.bench_function("row extraction - goalkeeper", |b| {
        b.iter(|| extract(black_box(&cells), PlayerRole::Goalkeeper));
    });

    c.bench_function("name splitter - all strategies", |b| {
        b.iter(|| {
            for raw in ["10 Nome", "Nome (7)", "Nome7", "Nome #9", "Nome Sobrenome2025"] {
                black_box(split(black_box(raw)));
            }
        });
    });
}

criterion_group!(benches, extraction_benchmark);
criterion_main!(benches);
