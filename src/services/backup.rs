// src/services/backup.rs
//
// Static fund dataset served whenever the market-data provider is out of
// reach. Values are plausible snapshots, not live data.

use crate::models::{CompositionSlice, FundQuote};

#[allow(clippy::too_many_arguments)]
fn entry(
    ticker: &str,
    name: &str,
    price: f64,
    change_percent: f64,
    last_dividend: f64,
    dividend_yield: f64,
    patrimony: f64,
    p_vp: f64,
    category: &str,
    manager: &str,
    description: &str,
) -> FundQuote {
    FundQuote {
        ticker: ticker.to_string(),
        name: name.to_string(),
        price,
        change_percent,
        last_dividend,
        dividend_yield,
        patrimony,
        p_vp,
        category: category.to_string(),
        manager: manager.to_string(),
        description: description.to_string(),
    }
}

/// The curated backup list. Tickers are unique within the set.
pub fn funds() -> Vec<FundQuote> {
    vec![
        entry(
            "MXRF11", "Maxi Renda FII", 10.45, 0.29, 0.10, 0.115, 2_850_000_000.0, 1.02,
            "Recebíveis", "BTG Pactual",
            "Fundo híbrido com foco em CRI e permutas financeiras residenciais.",
        ),
        entry(
            "HGLG11", "CSHG Logística FII", 158.90, -0.41, 1.10, 0.083, 3_700_000_000.0, 0.97,
            "Logística", "CSHG",
            "Galpões logísticos de alto padrão concentrados no eixo Sudeste.",
        ),
        entry(
            "KNRI11", "Kinea Renda Imobiliária FII", 144.20, 0.12, 0.91, 0.076, 4_100_000_000.0, 0.88,
            "Híbrido", "Kinea",
            "Carteira mista de lajes corporativas e centros logísticos.",
        ),
        entry(
            "XPML11", "XP Malls FII", 104.75, 0.55, 0.92, 0.105, 2_950_000_000.0, 0.95,
            "Shoppings", "XP Asset",
            "Participações em shopping centers dominantes nas capitais.",
        ),
        entry(
            "VISC11", "Vinci Shopping Centers FII", 106.30, 0.18, 0.88, 0.099, 2_400_000_000.0, 0.91,
            "Shoppings", "Vinci Partners",
            "Portfólio diversificado de shoppings com gestão ativa.",
        ),
        entry(
            "BCFF11", "BTG Pactual Fundo de Fundos FII", 71.60, -0.22, 0.60, 0.101, 1_800_000_000.0, 0.84,
            "Fundo de Fundos", "BTG Pactual",
            "Fundo de fundos com alocação tática entre tijolo e papel.",
        ),
        entry(
            "HGRE11", "CSHG Real Estate FII", 123.40, 0.08, 0.78, 0.076, 1_950_000_000.0, 0.79,
            "Lajes Corporativas", "CSHG",
            "Lajes corporativas em São Paulo com foco em vacância decrescente.",
        ),
        entry(
            "XPLG11", "XP Log FII", 99.85, 0.33, 0.72, 0.087, 2_600_000_000.0, 0.90,
            "Logística", "XP Asset",
            "Condomínios logísticos locados para varejo e e-commerce.",
        ),
        entry(
            "BTLG11", "BTG Pactual Logística FII", 97.50, 0.27, 0.76, 0.094, 2_300_000_000.0, 0.98,
            "Logística", "BTG Pactual",
            "Ativos logísticos last-mile próximos aos grandes centros.",
        ),
        entry(
            "IRDM11", "Iridium Recebíveis Imobiliários FII", 71.90, -0.63, 0.75, 0.125, 2_100_000_000.0, 0.93,
            "Recebíveis", "Iridium",
            "CRI indexados a IPCA e CDI com gestão ativa de crédito.",
        ),
        entry(
            "KNCR11", "Kinea Rendimentos Imobiliários FII", 102.80, 0.05, 0.98, 0.114, 3_900_000_000.0, 1.00,
            "Recebíveis", "Kinea",
            "Carteira de CRI majoritariamente atrelada ao CDI.",
        ),
        entry(
            "HFOF11", "Hedge Top FOFII 3 FII", 64.35, -0.15, 0.55, 0.103, 1_350_000_000.0, 0.86,
            "Fundo de Fundos", "Hedge Investments",
            "Fundo de fundos com giro ativo de cotas descontadas.",
        ),
        entry(
            "VILG11", "Vinci Logística FII", 88.10, 0.21, 0.68, 0.093, 1_600_000_000.0, 0.89,
            "Logística", "Vinci Partners",
            "Galpões logísticos multiusuário em regiões metropolitanas.",
        ),
        entry(
            "HSML11", "HSI Malls FII", 79.95, 0.44, 0.70, 0.105, 1_700_000_000.0, 0.87,
            "Shoppings", "HSI",
            "Shoppings regionais dominantes com potencial de expansão.",
        ),
        entry(
            "RBRF11", "RBR Alpha Multiestratégia FII", 54.70, -0.09, 0.45, 0.099, 1_100_000_000.0, 0.82,
            "Fundo de Fundos", "RBR Asset",
            "Multiestratégia com posições em tijolo, papel e desenvolvimento.",
        ),
        entry(
            "CPTS11", "Capitânia Securities II FII", 84.60, 0.11, 0.80, 0.113, 2_000_000_000.0, 0.96,
            "Recebíveis", "Capitânia",
            "CRI high grade com alocação complementar em cotas de FII.",
        ),
        entry(
            "GGRC11", "GGR Covepi Renda FII", 112.25, 0.02, 0.89, 0.095, 1_250_000_000.0, 0.99,
            "Logística", "Supernova Capital",
            "Contratos atípicos de longo prazo com operadores industriais.",
        ),
        entry(
            "VRTA11", "Fator Verità FII", 81.40, -0.30, 0.77, 0.112, 1_050_000_000.0, 0.92,
            "Recebíveis", "Fator",
            "CRI pulverizados com duration média e proteção inflacionária.",
        ),
    ]
}

/// Look up a statically known entry.
pub fn find(ticker: &str) -> Option<FundQuote> {
    funds()
        .into_iter()
        .find(|f| f.ticker.eq_ignore_ascii_case(ticker.trim()))
}

/// Resolve a ticker against the backup set, substituting a generic entry for
/// unknown tickers so lookups never miss.
pub fn resolve(ticker: &str) -> FundQuote {
    find(ticker).unwrap_or_else(|| default_entry(ticker))
}

fn default_entry(ticker: &str) -> FundQuote {
    let ticker = ticker.trim().to_ascii_uppercase();
    FundQuote {
        name: format!("Fundo Imobiliário {}", ticker),
        price: 100.0,
        change_percent: 0.0,
        last_dividend: 0.85,
        dividend_yield: 0.102,
        patrimony: 1_500_000_000.0,
        p_vp: 0.98,
        category: "Híbrido".to_string(),
        manager: "Administradora Independente".to_string(),
        description: format!(
            "Dados detalhados indisponíveis para {}; exibindo valores de referência.",
            ticker
        ),
        ticker,
    }
}

/// Fixed allocation breakdown shown on every detail page.
pub fn composition() -> Vec<CompositionSlice> {
    [
        ("Imóveis físicos", 42.0, "#2563eb"),
        ("CRI", 28.0, "#16a34a"),
        ("Renda fixa", 18.0, "#f59e0b"),
        ("Caixa", 12.0, "#6b7280"),
    ]
    .iter()
    .map(|(label, percentage, color)| CompositionSlice {
        label: label.to_string(),
        percentage: *percentage,
        color: color.to_string(),
    })
    .collect()
}
