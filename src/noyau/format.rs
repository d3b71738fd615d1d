// src/noyau/format.rs
//
// Affichage : nombre (ou texte du tampon) -> chaîne lisible.
// Purement cosmétique : aucun arrondi, seulement des séparateurs de milliers.

use super::tampon::parse_permissif;

/// Sentinelle affichée (et stockée dans l’historique) pour toute valeur non finie.
pub const SENTINELLE_ERREUR: &str = "Error";

/* ------------------------ Forme texte d’un nombre ------------------------ */

/// Forme texte “naturelle” d’un nombre : celle qui est réécrite dans le tampon.
///
/// - décimal le plus court qui relit la même valeur (pas de notation exponentielle)
/// - ±0 => "0"
/// - non finis => "Infinity" / "-Infinity" / "NaN" (relus par `parse_permissif`)
pub fn texte_nombre(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/* ------------------------ Séparateurs ------------------------ */

/// Insère `,` tous les 3 chiffres depuis la droite ; le signe reste devant.
fn grouper_milliers(entier: &str) -> String {
    let (signe, chiffres) = match entier.strip_prefix('-') {
        Some(reste) => ("-", reste),
        None => ("", entier),
    };

    let n = chiffres.len();
    let mut out = String::with_capacity(signe.len() + n + n / 3);
    out.push_str(signe);
    for (i, c) in chiffres.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Découpe au premier point, groupe la partie entière, recolle la partie décimale.
/// Partie décimale vide (point final) => partie entière seule.
fn decorer(texte: &str) -> String {
    match texte.split_once('.') {
        Some((entier, dec)) if !dec.is_empty() => {
            format!("{}.{dec}", grouper_milliers(entier))
        }
        Some((entier, _)) => grouper_milliers(entier),
        None => grouper_milliers(texte),
    }
}

/* ------------------------ API ------------------------ */

/// Formate un nombre pour l’affichage / l’historique.
pub fn format_nombre(v: f64) -> String {
    if !v.is_finite() {
        return SENTINELLE_ERREUR.to_string();
    }
    decorer(&texte_nombre(v))
}

/// Formate le texte du tampon tel quel (chiffres conservés : "0.50" reste "0.50").
pub fn format_tampon(texte: &str) -> String {
    if !parse_permissif(texte).is_finite() {
        return SENTINELLE_ERREUR.to_string();
    }
    decorer(texte)
}
