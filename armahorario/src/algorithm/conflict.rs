// Funciones para expandir secciones en bloques y detectar topes de horario.
use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::models::{Bloque, Dia, Hora, Seccion};

/// Intervalos semiabiertos [inicio, fin): si uno termina a las 10:00 y el otro
/// empieza a las 10:00 no hay tope.
pub fn horas_se_solapan(a: (Hora, Hora), b: (Hora, Hora)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Un bloque por cada par (sección, horario), en el orden de la selección.
pub fn expandir_bloques(secciones: &[Seccion]) -> Vec<Bloque> {
    let mut bloques = Vec::new();
    for sec in secciones {
        for h in &sec.horarios {
            bloques.push(Bloque {
                nrc: sec.nrc.clone(),
                asignatura: sec.asignatura.clone(),
                profesor: sec.profesor.clone(),
                nivel: sec.nivel.clone(),
                seccion: sec.seccion.clone(),
                dia: h.dia,
                inicio: h.inicio,
                fin: h.fin,
                conflicto: false,
                conflicto_con: Vec::new(),
            });
        }
    }
    bloques
}

/// Marca los topes comparando todos los pares de bloques del mismo día.
/// La marca es simétrica: ambos bloques quedan en conflicto y cada uno anota
/// el NRC del otro.
pub fn marcar_topes(mut bloques: Vec<Bloque>) -> Vec<Bloque> {
    for b in bloques.iter_mut() {
        b.conflicto = false;
        b.conflicto_con.clear();
    }
    for i in 0..bloques.len() {
        for j in (i + 1)..bloques.len() {
            if bloques[i].dia != bloques[j].dia { continue; }
            if horas_se_solapan((bloques[i].inicio, bloques[i].fin), (bloques[j].inicio, bloques[j].fin)) {
                marcar_par(&mut bloques, i, j);
            }
        }
    }
    debug!("marcar_topes: {} bloques, {} en tope", bloques.len(), bloques.iter().filter(|b| b.conflicto).count());
    bloques
}

/// Variante por barrido: agrupa por día, ordena por inicio y sólo compara cada
/// bloque con los que siguen abiertos. Produce las mismas marcas que
/// `marcar_topes`; el orden dentro de `conflicto_con` puede variar.
pub fn marcar_topes_barrido(mut bloques: Vec<Bloque>) -> Vec<Bloque> {
    for b in bloques.iter_mut() {
        b.conflicto = false;
        b.conflicto_con.clear();
    }

    let mut por_dia: BTreeMap<Dia, Vec<usize>> = BTreeMap::new();
    for (idx, b) in bloques.iter().enumerate() {
        por_dia.entry(b.dia).or_default().push(idx);
    }

    for (_dia, mut indices) in por_dia {
        indices.sort_by_key(|&i| (bloques[i].inicio, bloques[i].fin));
        // bloques que aún no terminan al llegar al inicio del actual
        let mut abiertos: Vec<usize> = Vec::new();
        for &actual in &indices {
            let inicio = bloques[actual].inicio;
            abiertos.retain(|&k| bloques[k].fin > inicio);
            for &k in &abiertos {
                marcar_par(&mut bloques, k, actual);
            }
            abiertos.push(actual);
        }
    }
    bloques
}

fn marcar_par(bloques: &mut [Bloque], i: usize, j: usize) {
    let nrc_i = bloques[i].nrc.clone();
    let nrc_j = bloques[j].nrc.clone();
    bloques[i].conflicto = true;
    bloques[j].conflicto = true;
    bloques[i].conflicto_con.push(nrc_j);
    bloques[j].conflicto_con.push(nrc_i);
}

/// Expande la selección y marca los topes.
pub fn calcular_topes(secciones: &[Seccion]) -> Vec<Bloque> {
    marcar_topes(expandir_bloques(secciones))
}

/// NRCs distintos que tienen al menos un bloque en tope, ordenados.
pub fn secciones_en_tope(bloques: &[Bloque]) -> Vec<String> {
    let set: BTreeSet<&str> = bloques
        .iter()
        .filter(|b| b.conflicto)
        .map(|b| b.nrc.as_str())
        .collect();
    set.into_iter().map(|s| s.to_string()).collect()
}
