use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::ComposeResult;

/// Built-in Japanese hooks used when no caption file is given.
pub const HOOK_TEMPLATES: &[&str] = &[
    "2025秋、周りと絶対被らない「モテスウェット」8選",
    "1万円未満で買えちゃう「最強デート服」5選",
    "迷ってそれ着とけば絶対勝てる「大人フーディー」6選",
    "あ、センスあるなと2秒でバレる「最強アウター」7選",
    "女子ウケ確定。「本当に着てほしいニット」はこれ8選",
    "周りと被らない「最強コスパアウター」10選",
    "迷ったらコレで勝てる「シンプルジャケット」5選",
    "1万円以下で「センスある」って思われるスニーカー6選",
    "2025秋、絶対外さない「黒パーカー」最強リスト7",
    "女性が選ぶ「本当に着てほしいスウェット」5選",
    "これ着とけばOK。「無敵の白ロンT」6選",
    "2025秋、ガチで女性ウケする「カーディガン」5選",
    "2秒で“オシャレ”とバレる「最強セットアップ」7選",
    "1万円未満で無双する「高見えアウター」5選",
    "2025秋、女子が二度見する「モテシャツ」8選",
    "迷ったらコレ。女子ウケ確実な「スウェットパンツ」6選",
    "周りと差がつく「最強フーディー」はこの5選",
    "2025秋、絶対勝てる「デートコーデ」7パターン",
    "周りと被らない「最強の黒」アイテム8選",
    "2025秋、最強の「モテスニーカー」6選",
    "1万円以下で揃う「大人の勝負服」5選",
    "あ、清潔感ある。と思われる「白シャツ」最強リスト",
    "周りと被らない「センス最強バッグ」7選",
    "2025秋、女子が好きな「ゆるニット」8選",
    "迷ったらコレ。失敗しない「黒パンツ」5選",
    "ぶっちゃけ、女子は「ロゴ」より「無地」が好き。最強5選",
    "2秒で勝てる「最強の香り（香水）」6選",
    "2025秋、本気でモテる「大人ジャケット」5選",
    "コスパ最強。「高見え」確定のアイテム7選",
    "これが正解。女子ウケ「最強レイヤード」8選",
    "そのパーカー、女子ウケ確定。",
    "結局、女の子は'普通'の白Tが一番好き。",
    "迷ったら、黒の「ちょいゆるスウェット」着とけばOK。",
    "女子は「意外と」シンプルな時計を見てる。",
    "その「とりあえず感」が、逆に最強。",
    "2025秋、そのアウターが正解。",
    "ぶっちゃけ、女子は「細すぎるパンツ」より、ちょいゆる派。",
    "「センスあるな」って思われたいなら、コレ。",
    "そのスニーカー、本気でモテるやつ。",
    "結局、モテる奴は「白」の使い方がうまい。",
    "「なんか雰囲気ある」って思われる人の共通点。",
    "その服、「頼りになりそう」って思われるよ。",
    "ぶっちゃけ、女子は「カバン」で男を判断する。",
    "女子が「守ってあげたい」と思う服装、知ってる？",
    "2025秋、これ着てたら「ガチ勢」確定。",
    "ぶっちゃけ、モテるのに金は要らない。",
    "その「清潔感」、最強の武器になる。",
    "女子は「ギャップ」に弱い。最強フーディーがこれ。",
    "2025秋、これさえあれば無双できる。",
    "そのシンプルさ、2秒で「センスある」ってバレる。",
];

/// Read captions from a JSON array of strings.
pub fn load_captions(path: &Path) -> ComposeResult<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read captions '{}'", path.display()))?;
    let captions: Vec<String> = serde_json::from_str(&text)?;
    tracing::info!(count = captions.len(), path = %path.display(), "loaded captions");
    Ok(captions)
}

/// `n` captions cycling through [`HOOK_TEMPLATES`].
pub fn template_captions(n: usize) -> Vec<String> {
    HOOK_TEMPLATES
        .iter()
        .cycle()
        .take(n)
        .map(|s| s.to_string())
        .collect()
}

/// Save `captions` as pretty JSON to `hooks_<UTC %Y%m%dT%H%M%SZ>.json` in `dir`, creating it.
pub fn save_captions(dir: &Path, captions: &[String]) -> ComposeResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create captions dir '{}'", dir.display()))?;
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let path = dir.join(format!("hooks_{stamp}.json"));
    let json = serde_json::to_string_pretty(captions)?;
    std::fs::write(&path, json).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(count = captions.len(), path = %path.display(), "saved captions");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/content/captions.rs"]
mod tests;
